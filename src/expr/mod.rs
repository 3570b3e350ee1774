//! Expression trees, fusion and the read/write views built on them.
//!
//! # Architecture
//!
//! ```text
//!   storage.read(i) ──▶ ReadView ──┐
//!   storage.read(j) ──▶ ReadView ──┼─ combinators ─▶ ReadView(tree)
//!   2.0, 0.5, ...  ──▶ scalar  ──┘     (fusion)          │
//!                                                        ▼
//!   storage.write(k) ─────────────────────────────▶ WriteView ─▶ eval ─▶ store
//! ```
//!
//! | Module | Role |
//! |--------|------|
//! | `node` | [`Node`] catalog, evaluation and shape queries |
//! | [`fusion`] | Rewrites applied as add/sub nodes are built |
//! | `builder` | Named combinators ([`add`], [`mul`], [`sqrt`], ...) |
//! | `view` | [`ReadView`] and its operator overloads |
//! | `write` | [`WriteView`] guard and compound assignment |
//! | `pow` | Integer powers ([`ipow`]) |
//!
//! Nothing is computed until a write-view stores or
//! [`ReadView::evaluate`] is called. Each statement's tree is built,
//! evaluated once and discarded.

mod builder;
mod display;
pub mod fusion;
mod node;
mod pow;
mod view;
mod write;

pub use builder::{add, div, exp, log, mul, neg, powi, sqrt, sub};
pub use node::{Node, NodeKind};
pub use pow::ipow;
pub use view::ReadView;
pub use write::{ViewState, WriteView};
