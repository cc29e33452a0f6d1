use htmljson_dom::{Attribute, NodeKind};

/// A node of a parse tree that can be converted.
///
/// Implementations copy data out of their own representation; the converter
/// keeps no reference to the source once it returns. Handles are expected to
/// be cheap to clone (reference counts, indices, or shared references).
pub trait SourceNode: Sized {
    /// The node's kind, or `None` if it is not one of the kinds
    /// [`NodeKind`] knows about.
    fn kind(&self) -> Option<NodeKind>;

    /// Tag name, text, comment body, or doctype name.
    fn data(&self) -> String;

    /// Element namespace, empty for plain HTML.
    fn namespace(&self) -> String;

    /// Attributes in source order, duplicates included.
    fn attributes(&self) -> Vec<Attribute>;

    /// Children in document order.
    fn children(&self) -> Vec<Self>;
}
