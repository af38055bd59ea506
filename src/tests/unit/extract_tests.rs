use crate::core::error::Error;
use crate::core::extract::extract;
use crate::tests::common::fixtures::{empty_pdf, pdf_with_pages};

#[test]
fn two_page_pdf_joins_pages_with_newline() {
    let pdf = pdf_with_pages(&["Hello.", "World."]);
    assert_eq!(extract(&pdf).unwrap(), "Hello.\nWorld.");
}

#[test]
fn single_page_pdf_has_no_trailing_newline() {
    let pdf = pdf_with_pages(&["Just one page."]);
    assert_eq!(extract(&pdf).unwrap(), "Just one page.");
}

#[test]
fn zero_page_pdf_yields_empty_string() {
    assert_eq!(extract(&empty_pdf()).unwrap(), "");
}

#[test]
fn page_order_is_preserved() {
    let pdf = pdf_with_pages(&["first", "second", "third"]);
    assert_eq!(extract(&pdf).unwrap(), "first\nsecond\nthird");
}

#[test]
fn unparseable_buffer_fails_with_extraction_error() {
    let result = extract(b"this is not a pdf");
    assert!(matches!(result, Err(Error::Extraction(_))));
}

#[test]
fn empty_buffer_fails_with_extraction_error() {
    assert!(matches!(extract(&[]), Err(Error::Extraction(_))));
}
