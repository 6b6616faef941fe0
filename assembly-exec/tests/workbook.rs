mod common;

use std::sync::Arc;
use std::time::Duration;

use assembly_exec::spec::{read_rows, DocumentSpecFetcher, SpecDocumentDownloader};
use assembly_exec::{AssemblyError, ErrorKind, SpecFetcher};
use common::{response, ScriptedHttp};
use rust_xlsxwriter::Workbook;

fn build_workbook(rows: &[&[&str]]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Sheet1").unwrap();
    for (r, cells) in rows.iter().enumerate() {
        for (c, text) in cells.iter().enumerate() {
            if !text.is_empty() {
                sheet.write_string(r as u32, c as u16, *text).unwrap();
            }
        }
    }
    workbook.save_to_buffer().unwrap()
}

fn member_sheet() -> Vec<u8> {
    build_workbook(&[
        &["국회의원 인적사항"],
        &["요청주소"],
        &["- https://open.assembly.go.kr/portal/openapi/nwvrqwxyaytdsfvhu"],
        &["기본인자"],
        &["변수명", "타입", "변수 설명"],
        &["KEY", "STRING(필수)", "인증키"],
        &["Type", "STRING(필수)", "호출 문서(xml, json)"],
        &["요청인자"],
        &["HG_NM", "STRING(선택)", "이름"],
        &["출력값"],
        &["MONA_CD", "STRING(선택)", "국회의원코드"],
    ])
}

#[test]
fn workbook_rows_keep_absolute_positions() {
    let bytes = build_workbook(&[&[""], &["", "", "x"], &["요청주소", "b"]]);
    let rows = read_rows("svc", &bytes).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1][2], "x");
    assert_eq!(rows[2][0], "요청주소");
}

#[test]
fn garbage_is_a_workbook_parse_error() {
    let mut bytes = b"PK\x03\x04".to_vec();
    bytes.resize(256, 0);
    assert!(read_rows("svc", &bytes).is_err());
}

#[tokio::test]
async fn document_fetcher_downloads_and_parses() {
    let http = Arc::new(ScriptedHttp::new(vec![response(200, member_sheet())]));
    let downloader = Arc::new(SpecDocumentDownloader::new(
        http.clone(),
        "https://open.assembly.go.kr/portal/data/openapi/downloadOpenApiSpec.do",
        "test-agent",
        Duration::from_secs(30),
        1 << 20,
    ));
    let fetcher = DocumentSpecFetcher::new(downloader, 2);

    let spec = fetcher.fetch("OWSSC6001134T516707").await.unwrap();
    assert_eq!(spec.endpoint, "nwvrqwxyaytdsfvhu");
    assert_eq!(spec.basic_params.len(), 2);
    assert_eq!(spec.request_params.len(), 1);
    assert_eq!(spec.request_params[0].name, "HG_NM");
    assert!(!spec.request_params[0].required);
}

#[tokio::test]
async fn sheet_without_endpoint_fails_with_parse_error() {
    let bytes = build_workbook(&[&["기본인자"], &["KEY", "STRING(필수)", "인증키"]]);
    let http = Arc::new(ScriptedHttp::new(vec![response(200, bytes)]));
    let downloader = Arc::new(SpecDocumentDownloader::new(
        http,
        "https://open.assembly.go.kr/portal/data/openapi/downloadOpenApiSpec.do",
        "test-agent",
        Duration::from_secs(30),
        1 << 20,
    ));
    let err = DocumentSpecFetcher::new(downloader, 2)
        .fetch("svc")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(matches!(err, AssemblyError::Parse(_)));
}
