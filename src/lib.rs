//! Turns a token ledger (a holders CSV and a transactions CSV) into nodes and
//! links ready to be drawn: one circle per funded account, sized by balance
//! and colored by share of supply, with the largest holder marked as treasury.

mod compute;
mod data;
mod read;
mod scale;
mod style;
mod write;

pub use compute::{build_graph, LedgerGraphBuilder};
pub use data::{
    Color, Error, GraphEdge, GraphModel, GraphNode, HolderRecord, Timestamp, TransferRecord,
};
pub use scale::{SqrtScale, ThresholdScale};
pub use style::GraphStyle;
pub use write::write_graph;
