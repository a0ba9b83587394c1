//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("DOM error: {0}")]
    Dom(#[from] styletrend_dom::DomError),

    #[error("Document has no <body> element")]
    MissingBody,

    #[error("Document has no root element")]
    MissingDocumentElement,
}
