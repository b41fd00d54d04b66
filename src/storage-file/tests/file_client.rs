// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Exercise the file clients against a local HTTP server.

#[cfg(test)]
mod tests {
    use azcore::options::RequestOptionsBuilder;
    use azure_storage_file::client::{FileServiceClient, ShareClient};
    use azure_storage_file::model::*;
    use futures::TryStreamExt;
    use httptest::{Expectation, Server, matchers::*, responders::*};
    use std::time::Duration;

    type Result<T> = anyhow::Result<T>;

    const ACCOUNT: &str = "myaccount";

    fn endpoint(server: &Server) -> String {
        format!("http://{}/{ACCOUNT}", server.addr())
    }

    async fn service_client(server: &Server) -> Result<FileServiceClient> {
        let client = FileServiceClient::builder(endpoint(server)).build().await?;
        Ok(client)
    }

    async fn share_client(server: &Server) -> Result<ShareClient> {
        let client = ShareClient::builder(endpoint(server), "share1")
            .build()
            .await?;
        Ok(client)
    }

    fn storage_response(
        status: u16,
        headers: &[(&'static str, &'static str)],
        body: &'static str,
    ) -> impl Responder {
        let mut response = status_code(status)
            .insert_header("x-ms-request-id", "req-1")
            .insert_header("x-ms-version", "2019-02-02")
            .insert_header("date", "Thu, 14 Feb 2019 10:00:00 GMT")
            .insert_header("etag", "\"0x8D692C3A5E2F6A0\"")
            .insert_header("last-modified", "Thu, 14 Feb 2019 10:00:00 GMT");
        for (name, value) in headers {
            response = response.insert_header(*name, *value);
        }
        response.body(body)
    }

    const SMB_HEADERS: &[(&str, &str)] = &[
        ("x-ms-file-attributes", "Archive"),
        ("x-ms-file-creation-time", "2019-02-14T10:00:00.1234567Z"),
        ("x-ms-file-last-write-time", "2019-02-14T10:00:00.1234567Z"),
        ("x-ms-file-change-time", "2019-02-14T10:00:00.1234567Z"),
        ("x-ms-file-permission-key", "1234567890*1234567890"),
        ("x-ms-file-id", "13835128424026341376"),
        ("x-ms-file-parent-id", "0"),
    ];

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn service_properties() -> Result<()> {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/myaccount/"),
                request::query(url_decoded(contains(("restype", "service")))),
                request::query(url_decoded(contains(("comp", "properties")))),
                request::headers(contains(("x-ms-version", "2019-02-02"))),
            ])
            .respond_with(storage_response(
                200,
                &[],
                r#"<?xml version="1.0" encoding="utf-8"?><StorageServiceProperties><HourMetrics><Version>1.0</Version><Enabled>true</Enabled><IncludeAPIs>true</IncludeAPIs><RetentionPolicy><Enabled>true</Enabled><Days>7</Days></RetentionPolicy></HourMetrics><Cors /></StorageServiceProperties>"#,
            )),
        );
        server.expect(
            Expectation::matching(all_of![
                request::method_path("PUT", "/myaccount/"),
                request::query(url_decoded(contains(("comp", "properties")))),
                request::body(matches("<MinuteMetrics><Version>1.0</Version><Enabled>false</Enabled></MinuteMetrics>")),
                request::body(not(matches("<HourMetrics>"))),
            ])
            .respond_with(storage_response(202, &[], "")),
        );

        let client = service_client(&server).await?;
        let properties = client.get_properties().send().await?;
        assert_eq!(properties.response.request_id.as_deref(), Some("req-1"));
        let hour = properties.hour_metrics.expect("hour metrics are present");
        assert!(hour.enabled);
        assert_eq!(hour.retention_policy.and_then(|r| r.days), Some(7));
        assert_eq!(properties.minute_metrics, None);

        let response = client
            .set_properties(
                FileServiceProperties::new().set_minute_metrics(Metrics::new().set_enabled(false)),
            )
            .send()
            .await?;
        assert_eq!(response.version.as_deref(), Some("2019-02-02"));
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn list_shares() -> Result<()> {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/myaccount/"),
                request::query(url_decoded(contains(("comp", "list")))),
                request::query(url_decoded(contains(("include", "snapshots,metadata")))),
                request::query(url_decoded(not(contains(key("marker"))))),
            ])
            .respond_with(storage_response(
                200,
                &[],
                r#"<EnumerationResults ServiceEndpoint="http://127.0.0.1/myaccount/"><Shares><Share><Name>s1</Name><Properties><Last-Modified>Thu, 14 Feb 2019 10:00:00 GMT</Last-Modified><Etag>"0x1"</Etag><Quota>10</Quota></Properties><Metadata><team>a</team></Metadata></Share></Shares><NextMarker>/myaccount/s2</NextMarker></EnumerationResults>"#,
            )),
        );
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/myaccount/"),
                request::query(url_decoded(contains(("marker", "/myaccount/s2")))),
            ])
            .respond_with(storage_response(
                200,
                &[],
                r#"<EnumerationResults ServiceEndpoint="http://127.0.0.1/myaccount/"><Shares><Share><Name>s2</Name><Properties><Last-Modified>Thu, 14 Feb 2019 10:00:00 GMT</Last-Modified><Etag>"0x2"</Etag><Quota>20</Quota></Properties></Share></Shares><NextMarker /></EnumerationResults>"#,
            )),
        );

        let client = service_client(&server).await?;
        let shares = client
            .list_shares()
            .set_include_metadata(true)
            .set_include_snapshots(true)
            .by_item()
            .try_collect::<Vec<_>>()
            .await?;
        let got = shares
            .iter()
            .map(|s| (s.name.as_str(), s.properties.quota))
            .collect::<Vec<_>>();
        assert_eq!(got, vec![("s1", 10), ("s2", 20)]);
        assert_eq!(shares[0].metadata.get("team").map(String::as_str), Some("a"));
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn share_lifecycle() -> Result<()> {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("PUT", "/myaccount/share1"),
                request::query(url_decoded(contains(("restype", "share")))),
                request::query(url_decoded(not(contains(key("comp"))))),
                request::headers(contains(("x-ms-share-quota", "10"))),
                request::headers(contains(("x-ms-meta-owner", "tests"))),
                request::headers(contains(("x-ms-version", "2019-02-02"))),
            ])
            .respond_with(storage_response(201, &[], "")),
        );
        server.expect(
            Expectation::matching(all_of![
                request::method_path("PUT", "/myaccount/share1"),
                request::query(url_decoded(contains(("comp", "snapshot")))),
            ])
            .respond_with(storage_response(
                201,
                &[("x-ms-snapshot", "2019-02-14T10:00:00.0000000Z")],
                "",
            )),
        );
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/myaccount/share1"),
                request::query(url_decoded(contains(("sharesnapshot", "2019-02-14T10:00:00.0000000Z")))),
            ])
            .respond_with(storage_response(
                200,
                &[("x-ms-share-quota", "10"), ("x-ms-meta-owner", "tests")],
                "",
            )),
        );
        server.expect(
            Expectation::matching(all_of![
                request::method_path("PUT", "/myaccount/share1"),
                request::query(url_decoded(contains(("comp", "properties")))),
                request::headers(contains(("x-ms-share-quota", "20"))),
            ])
            .respond_with(storage_response(200, &[], "")),
        );
        server.expect(
            Expectation::matching(all_of![
                request::method_path("DELETE", "/myaccount/share1"),
                request::headers(contains(("x-ms-delete-snapshots", "include"))),
                request::query(url_decoded(not(contains(key("sharesnapshot"))))),
            ])
            .respond_with(storage_response(202, &[], "")),
        );

        let client = share_client(&server).await?;
        let created = client
            .create()
            .set_quota(10)
            .set_metadata([("owner", "tests")])
            .send()
            .await?;
        assert_eq!(created.etag.as_deref(), Some("\"0x8D692C3A5E2F6A0\""));

        let snapshot = client.create_snapshot().send().await?;
        assert_eq!(snapshot.snapshot, "2019-02-14T10:00:00.0000000Z");

        let properties = client
            .with_snapshot(snapshot.snapshot)
            .get_properties()
            .send()
            .await?;
        assert_eq!(properties.quota, 10);
        assert_eq!(
            properties.metadata.get("owner").map(String::as_str),
            Some("tests")
        );

        client.set_quota(20).send().await?;
        client.delete().set_include_snapshots(true).send().await?;
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn permissions() -> Result<()> {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("PUT", "/myaccount/share1"),
                request::query(url_decoded(contains(("comp", "filepermission")))),
                request::headers(contains(("content-type", "application/json"))),
                request::body(json_decoded(eq(serde_json::json!({"permission": "O:S-1-5-21G:S-1-5-21D:(A;;FA;;;BA)"})))),
            ])
            .respond_with(storage_response(
                201,
                &[("x-ms-file-permission-key", "key-1")],
                "",
            )),
        );
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/myaccount/share1"),
                request::query(url_decoded(contains(("comp", "filepermission")))),
                request::headers(contains(("x-ms-file-permission-key", "key-1"))),
            ])
            .respond_with(storage_response(
                200,
                &[("content-type", "application/json")],
                r#"{"permission": "O:S-1-5-21G:S-1-5-21D:(A;;FA;;;BA)"}"#,
            )),
        );

        let client = share_client(&server).await?;
        let key = client
            .create_permission("O:S-1-5-21G:S-1-5-21D:(A;;FA;;;BA)")
            .send()
            .await?;
        assert_eq!(key.key, "key-1");
        let permission = client.get_permission(key.key).send().await?;
        assert_eq!(permission.permission, "O:S-1-5-21G:S-1-5-21D:(A;;FA;;;BA)");
        assert_eq!(permission.response.request_id.as_deref(), Some("req-1"));

        let err = client.create_permission("").send().await.unwrap_err();
        assert!(err.is_binding(), "{err:?}");
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn access_policy_and_statistics() -> Result<()> {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("PUT", "/myaccount/share1"),
                request::query(url_decoded(contains(("comp", "acl")))),
                request::body(matches("<SignedIdentifiers><SignedIdentifier><Id>read-only</Id><AccessPolicy>.*<Permission>rl</Permission></AccessPolicy></SignedIdentifier></SignedIdentifiers>")),
            ])
            .respond_with(storage_response(200, &[], "")),
        );
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/myaccount/share1"),
                request::query(url_decoded(contains(("comp", "acl")))),
            ])
            .respond_with(storage_response(
                200,
                &[],
                "<SignedIdentifiers><SignedIdentifier><Id>read-only</Id><AccessPolicy><Start>2019-02-14T10:00:00.0000000Z</Start><Expiry>2019-03-14T10:00:00.0000000Z</Expiry><Permission>rl</Permission></AccessPolicy></SignedIdentifier></SignedIdentifiers>",
            )),
        );
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/myaccount/share1"),
                request::query(url_decoded(contains(("comp", "stats")))),
            ])
            .respond_with(storage_response(
                200,
                &[],
                "<ShareStats><ShareUsageBytes>4096</ShareUsageBytes></ShareStats>",
            )),
        );

        let client = share_client(&server).await?;
        let policy = AccessPolicy::new().set_permission("rl");
        client
            .set_access_policy()
            .set_signed_identifiers([SignedIdentifier::new("read-only", policy)])
            .send()
            .await?;
        let got = client.get_access_policy().send().await?;
        assert_eq!(got.signed_identifiers.len(), 1);
        assert_eq!(got.signed_identifiers[0].id, "read-only");
        assert_eq!(
            got.signed_identifiers[0].access_policy.permission.as_deref(),
            Some("rl")
        );
        assert!(got.etag.is_some());

        let statistics = client.get_statistics().send().await?;
        assert_eq!(statistics.share_usage_bytes, 4096);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn directory_defaults() -> Result<()> {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("PUT", "/myaccount/share1/reports/2019"),
                request::query(url_decoded(contains(("restype", "directory")))),
                request::query(url_decoded(not(contains(key("comp"))))),
                request::headers(contains(("x-ms-file-permission", "inherit"))),
                request::headers(contains(("x-ms-file-attributes", "Directory"))),
                request::headers(contains(("x-ms-file-creation-time", "now"))),
                request::headers(contains(("x-ms-file-last-write-time", "now"))),
            ])
            .respond_with(storage_response(201, SMB_HEADERS, "")),
        );
        server.expect(
            Expectation::matching(all_of![
                request::method_path("PUT", "/myaccount/share1/reports/2019"),
                request::query(url_decoded(contains(("comp", "properties")))),
                request::headers(contains(("x-ms-file-permission", "preserve"))),
                request::headers(contains(("x-ms-file-attributes", "Directory|Hidden"))),
                request::headers(contains(("x-ms-file-creation-time", "2019-02-14T10:00:00.5000000Z"))),
                request::headers(contains(("x-ms-file-last-write-time", "preserve"))),
            ])
            .respond_with(storage_response(200, SMB_HEADERS, "")),
        );

        let client = share_client(&server).await?;
        let directory = client.directory_client("/reports/2019/");
        let info = directory.create().send().await?;
        assert_eq!(info.smb.file_id.as_deref(), Some("13835128424026341376"));
        assert_eq!(info.smb.file_attributes.as_deref(), Some("Archive"));
        assert!(info.smb.creation_time.is_some());

        let creation = chrono::DateTime::parse_from_rfc3339("2019-02-14T10:00:00.5Z")?
            .with_timezone(&chrono::Utc);
        directory
            .set_properties()
            .set_file_attributes("Directory|Hidden")
            .set_creation_time(creation)
            .send()
            .await?;
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn permission_by_key() -> Result<()> {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("PUT", "/myaccount/share1/reports"),
                request::query(url_decoded(contains(("restype", "directory")))),
                request::headers(contains(("x-ms-file-permission-key", "1234*5678"))),
                request::headers(not(contains(key("x-ms-file-permission")))),
            ])
            .respond_with(storage_response(201, SMB_HEADERS, "")),
        );

        let client = share_client(&server).await?;
        client
            .directory_client("reports")
            .create()
            .set_file_permission_key("1234*5678")
            .send()
            .await?;
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn permission_and_key_conflict() -> Result<()> {
        use azcorei::operation::BindingError;
        use std::error::Error as _;

        // No expectations: the request must fail before reaching the service.
        let server = Server::run();
        let client = share_client(&server).await?;
        let err = client
            .file_client("reports/f.txt")
            .create(16)
            .set_file_permission("O:BAG:SYD:(A;;FA;;;BA)")
            .set_file_permission_key("1234*5678")
            .send()
            .await
            .unwrap_err();
        assert!(err.is_binding(), "{err:?}");
        let source = err.source().and_then(|e| e.downcast_ref::<BindingError>());
        assert!(
            matches!(source, Some(BindingError::ConflictingParameters(..))),
            "{err:?}"
        );

        let err = client
            .directory_client("reports")
            .set_properties()
            .set_file_permission("O:BAG:SYD:(A;;FA;;;BA)")
            .set_file_permission_key("1234*5678")
            .send()
            .await
            .unwrap_err();
        assert!(err.is_binding(), "{err:?}");
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn list_files_and_directories() -> Result<()> {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/myaccount/share1"),
                request::query(url_decoded(contains(("restype", "directory")))),
                request::query(url_decoded(contains(("comp", "list")))),
                request::query(url_decoded(contains(("maxresults", "2")))),
                request::query(url_decoded(not(contains(key("marker"))))),
            ])
            .respond_with(storage_response(
                200,
                &[],
                r#"<EnumerationResults ServiceEndpoint="http://127.0.0.1/myaccount/" ShareName="share1" DirectoryPath=""><Entries><File><Name>a.txt</Name><Properties><Content-Length>3</Content-Length></Properties></File><Directory><Name>reports</Name><Properties /></Directory></Entries><NextMarker>m2</NextMarker></EnumerationResults>"#,
            )),
        );
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/myaccount/share1"),
                request::query(url_decoded(contains(("marker", "m2")))),
            ])
            .respond_with(storage_response(
                200,
                &[],
                r#"<EnumerationResults ServiceEndpoint="http://127.0.0.1/myaccount/" ShareName="share1" DirectoryPath=""><Entries><File><Name>b.txt</Name><Properties><Content-Length>5</Content-Length></Properties></File></Entries><NextMarker /></EnumerationResults>"#,
            )),
        );

        let client = share_client(&server).await?;
        let mut pages = client
            .root_directory_client()
            .list_files_and_directories()
            .set_max_page_size(2)
            .by_page();
        let mut names = Vec::new();
        let mut count = 0;
        while let Some(page) = pages.next().await {
            let page = page?;
            count += 1;
            names.extend(page.entries.iter().map(|e| e.name().to_string()));
        }
        assert_eq!(count, 2);
        assert_eq!(names, vec!["a.txt", "reports", "b.txt"]);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn listing_stops_after_error() -> Result<()> {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/myaccount/share1/missing"))
                .times(1)
                .respond_with(
                    status_code(404)
                        .insert_header("x-ms-error-code", "ResourceNotFound")
                        .body(""),
                ),
        );

        let client = share_client(&server).await?;
        let mut items = client
            .directory_client("missing")
            .list_files_and_directories()
            .by_item();
        let err = items.next().await.expect("an error is returned").unwrap_err();
        assert_eq!(err.http_status_code(), Some(404));
        assert_eq!(err.status().map(|s| s.code.as_str()), Some("ResourceNotFound"));
        assert!(items.next().await.is_none());
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn handles() -> Result<()> {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/myaccount/share1/reports"),
                request::query(url_decoded(contains(("comp", "listhandles")))),
                request::headers(contains(("x-ms-recursive", "true"))),
            ])
            .respond_with(storage_response(
                200,
                &[],
                "<EnumerationResults><Entries><Handle><HandleId>h1</HandleId><Path>reports/a.txt</Path><FileId>1</FileId><ParentId>0</ParentId><SessionId>9</SessionId><ClientIp>10.0.0.4:49152</ClientIp><OpenTime>Thu, 14 Feb 2019 10:00:00 GMT</OpenTime></Handle></Entries><NextMarker /></EnumerationResults>",
            )),
        );
        server.expect(
            Expectation::matching(all_of![
                request::method_path("PUT", "/myaccount/share1/reports"),
                request::query(url_decoded(contains(("comp", "forceclosehandles")))),
                request::query(url_decoded(not(contains(key("marker"))))),
                request::headers(contains(("x-ms-handle-id", "*"))),
            ])
            .respond_with(storage_response(
                200,
                &[("x-ms-marker", "next"), ("x-ms-number-of-handles-closed", "2")],
                "",
            )),
        );
        server.expect(
            Expectation::matching(all_of![
                request::method_path("PUT", "/myaccount/share1/reports"),
                request::query(url_decoded(contains(("comp", "forceclosehandles")))),
                request::query(url_decoded(contains(("marker", "next")))),
            ])
            .respond_with(storage_response(
                200,
                &[("x-ms-number-of-handles-closed", "3")],
                "",
            )),
        );

        let client = share_client(&server).await?;
        let directory = client.directory_client("reports");
        let handles = directory
            .list_handles()
            .set_recursive(true)
            .by_item()
            .try_collect::<Vec<_>>()
            .await?;
        assert_eq!(handles.len(), 1);
        assert_eq!(handles[0].handle_id, "h1");

        let closed = directory.force_close_all_handles().send().await?;
        assert_eq!(closed.closed_handles_count, 5);
        assert_eq!(closed.marker, "");
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn file_create_upload_download() -> Result<()> {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("PUT", "/myaccount/share1/reports/a%20b.txt"),
                request::query(url_decoded(contains(("timeout", "30")))),
                request::headers(contains(("x-ms-type", "file"))),
                request::headers(contains(("x-ms-content-length", "11"))),
                request::headers(contains(("x-ms-content-type", "text/plain"))),
                request::headers(contains(("x-ms-file-attributes", "None"))),
                request::headers(contains(("x-ms-file-permission", "inherit"))),
                request::headers(contains(("x-ms-version", "2019-02-02"))),
            ])
            .respond_with(storage_response(
                201,
                &[("x-ms-request-server-encrypted", "true")],
                "",
            )),
        );
        server.expect(
            Expectation::matching(all_of![
                request::method_path("PUT", "/myaccount/share1/reports/a%20b.txt"),
                request::query(url_decoded(contains(("comp", "range")))),
                request::headers(contains(("x-ms-range", "bytes=0-10"))),
                request::headers(contains(("x-ms-write", "update"))),
                request::body(matches("^hello world$")),
            ])
            .respond_with(storage_response(201, &[], "")),
        );
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/myaccount/share1/reports/a%20b.txt"),
                request::headers(contains(("x-ms-range", "bytes=0-4"))),
            ])
            .respond_with(storage_response(
                206,
                &[
                    ("content-range", "bytes 0-4/11"),
                    ("content-type", "text/plain"),
                    ("x-ms-meta-owner", "tests"),
                ],
                "hello",
            )),
        );

        let client = share_client(&server).await?;
        let file = client.directory_client("reports").file_client("a b.txt");
        let info = file
            .create(11)
            .set_http_headers(FileHttpHeaders::new().set_content_type("text/plain"))
            .with_server_timeout(Duration::from_secs(30))
            .send()
            .await?;
        assert!(info.server_encrypted);

        file.upload_range(0, "hello world").send().await?;

        let download = file
            .download()
            .set_range(FileRange::new(0, 4))
            .send()
            .await?;
        assert_eq!(download.content, bytes::Bytes::from_static(b"hello"));
        assert_eq!(download.file_size(), 11);
        assert_eq!(
            download.properties.http_headers.content_type.as_deref(),
            Some("text/plain")
        );
        assert_eq!(
            download.properties.metadata.get("owner").map(String::as_str),
            Some("tests")
        );

        let err = file.upload_range(0, "").send().await.unwrap_err();
        assert!(err.is_binding(), "{err:?}");
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn file_properties_and_ranges() -> Result<()> {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("HEAD", "/myaccount/share1/f.bin"))
                .respond_with(storage_response(
                    200,
                    &[
                        ("content-length", "4096"),
                        ("x-ms-copy-status", "success"),
                        ("x-ms-copy-id", "c1"),
                        ("x-ms-server-encrypted", "true"),
                    ],
                    "",
                )),
        );
        server.expect(
            Expectation::matching(all_of![
                request::method_path("PUT", "/myaccount/share1/f.bin"),
                request::query(url_decoded(contains(("comp", "properties")))),
                request::headers(contains(("x-ms-content-length", "8192"))),
                request::headers(contains(("x-ms-file-permission", "preserve"))),
                request::headers(contains(("x-ms-file-attributes", "preserve"))),
            ])
            .respond_with(storage_response(200, SMB_HEADERS, "")),
        );
        server.expect(
            Expectation::matching(all_of![
                request::method_path("PUT", "/myaccount/share1/f.bin"),
                request::query(url_decoded(contains(("comp", "range")))),
                request::headers(contains(("x-ms-write", "clear"))),
                request::headers(contains(("x-ms-range", "bytes=512-1023"))),
            ])
            .respond_with(storage_response(201, &[], "")),
        );
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/myaccount/share1/f.bin"),
                request::query(url_decoded(contains(("comp", "rangelist")))),
            ])
            .respond_with(storage_response(
                200,
                &[("x-ms-content-length", "8192")],
                "<?xml version=\"1.0\" encoding=\"utf-8\"?><Ranges><Range><Start>0</Start><End>511</End></Range><Range><Start>1024</Start><End>4095</End></Range></Ranges>",
            )),
        );

        let client = share_client(&server).await?;
        let file = client.file_client("f.bin");
        let properties = file.get_properties().send().await?;
        assert_eq!(properties.content_length, 4096);
        assert_eq!(properties.copy.copy_status, Some(CopyStatus::Success));
        assert!(properties.server_encrypted);

        let info = file.set_http_headers().set_file_size(8192).send().await?;
        assert_eq!(info.smb.parent_id.as_deref(), Some("0"));

        file.clear_range(FileRange::new(512, 1023)).send().await?;

        let ranges = file.get_range_list().send().await?;
        assert_eq!(ranges.file_content_length, 8192);
        assert_eq!(
            ranges.ranges,
            vec![FileRange::new(0, 511), FileRange::new(1024, 4095)]
        );
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn copy() -> Result<()> {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("PUT", "/myaccount/share1/copy.bin"),
                request::headers(contains(("x-ms-copy-source", "https://other.file.core.windows.net/s/f.bin"))),
                request::headers(contains(("x-ms-meta-origin", "other"))),
            ])
            .respond_with(storage_response(
                202,
                &[("x-ms-copy-id", "c1"), ("x-ms-copy-status", "pending")],
                "",
            )),
        );
        server.expect(
            Expectation::matching(all_of![
                request::method_path("PUT", "/myaccount/share1/copy.bin"),
                request::query(url_decoded(contains(("comp", "copy")))),
                request::query(url_decoded(contains(("copyid", "c1")))),
                request::headers(contains(("x-ms-copy-action", "abort"))),
            ])
            .respond_with(storage_response(204, &[], "")),
        );

        let client = share_client(&server).await?;
        let file = client.file_client("copy.bin");
        let copy = file
            .start_copy("https://other.file.core.windows.net/s/f.bin")
            .set_metadata([("origin", "other")])
            .send()
            .await?;
        assert_eq!(copy.copy_id, "c1");
        assert_eq!(copy.copy_status, CopyStatus::Pending);
        file.abort_copy(copy.copy_id).send().await?;

        let err = file.abort_copy("").send().await.unwrap_err();
        assert!(err.is_binding(), "{err:?}");
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn empty_paths() -> Result<()> {
        let server = Server::run();
        let client = share_client(&server).await?;
        let err = client.file_client("/").delete().send().await.unwrap_err();
        assert!(err.is_binding(), "{err:?}");

        let client = ShareClient::builder(endpoint(&server), "").build().await?;
        let err = client.create().send().await.unwrap_err();
        assert!(err.is_binding(), "{err:?}");
        Ok(())
    }
}
