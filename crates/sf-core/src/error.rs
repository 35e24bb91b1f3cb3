use petgraph::graph::NodeIndex;

/// Failures of element-tree operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("node {0:?} is not a valid element to attach to")]
    InvalidParent(NodeIndex),
    #[error("node {0:?} does not exist in the document")]
    UnknownNode(NodeIndex),
    #[error("the document root cannot be removed")]
    RootRemoval,
}

/// Failures of style updates and inline-style parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StyleError {
    #[error("`{0}` style property doesn't exist")]
    UnknownKey(String),
    #[error("style property `{key}` expects {expected}")]
    InvalidValue {
        key: &'static str,
        expected: &'static str,
    },
    #[error("malformed inline style near `{0}`")]
    Malformed(String),
}
