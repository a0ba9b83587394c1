use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegenError {
    #[error("DOM error: {0}")]
    Dom(#[from] styletrend_dom::DomError),

    #[error("Unknown regeneration group: {0}")]
    UnknownGroup(usize),
}
