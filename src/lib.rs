/// SalesView - Filter, Sort, Selection and Aggregation State for a Sales Dashboard
///
/// Holds a master list of sale records and derives everything a dashboard
/// renders from it: the visible rows (filtered, then stably sorted), a
/// selection that never escapes the visible rows, the current page, and
/// region / product / date aggregates over the full record set.
///
/// Display surfaces read `Snapshot`s and submit `Intent`s; each intent is
/// applied and fully recomputed before observers are notified.

pub mod record;
pub mod validation;
pub mod filter;
pub mod sort;
pub mod aggregate;
pub mod store;
pub mod pagination;
pub mod config;
pub mod seed;
pub mod changeset;
pub mod view;
pub mod messages;

pub use record::{Field, FieldType, FieldValue, RecordId, SaleCandidate, SaleRecord};
pub use validation::{parse_date, validate, ValidSale, ValidationError, ValidationReason};
pub use filter::{Constraint, FieldFilter, FilterError, FilterOperator, FilterSet, MatchMode, Operand};
pub use sort::{SortKey, SortOrder, SortSpec};
pub use aggregate::{Aggregates, ChartKind, ChartSeries, Series, Summary};
pub use store::RecordStore;
pub use pagination::{PageInfo, Paginator};
pub use config::DashboardConfig;
pub use changeset::{Changeset, ViewChange, ViewObserver};
pub use view::{SalesView, Snapshot, ViewError};
pub use messages::{Intent, Response};
