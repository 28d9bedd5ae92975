/// Intent and response messages for driving a `SalesView` from a display surface
use serde::{Deserialize, Serialize};

use crate::filter::{Constraint, FieldFilter, FilterOperator};
use crate::record::{Field, RecordId, SaleCandidate, SaleRecord};
use crate::sort::SortSpec;
use crate::validation::ValidationError;
use crate::view::{SalesView, Snapshot};

/// Messages sent from the display surface to the view
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Intent {
    /// Request the current snapshot
    Query,

    SetGlobalFilter { text: String },

    SetFieldFilter { field: Field, filter: FieldFilter },

    AddConstraint { field: Field, constraint: Constraint },

    RemoveConstraint { field: Field, index: usize },

    SetFieldOperator { field: Field, operator: FilterOperator },

    ClearFilters,

    SetSort { sort: SortSpec },

    /// Cycle one column through ascending, descending and unsorted
    ToggleSort { field: Field },

    SetSelection { ids: Vec<RecordId> },

    AddRecord { candidate: SaleCandidate },

    DeleteSelected,

    SetPage { page: usize },

    SetPageSize { page_size: usize },
}

/// Messages sent from the view back to the display surface
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Response {
    /// Full derived state after the intent was applied
    Snapshot { snapshot: Snapshot },

    /// A record passed validation and was stored
    RecordAdded { record: SaleRecord },

    /// A candidate was rejected; one error per invalid field
    ValidationFailed { errors: Vec<ValidationError> },

    /// Selected records were removed
    Deleted { count: usize },

    /// Error occurred
    Error { message: String },
}

impl SalesView {
    /// Apply one intent and describe the outcome.
    pub fn dispatch(&mut self, intent: Intent) -> Response {
        log::trace!("dispatching {:?}", intent);

        match intent {
            Intent::Query => {}

            Intent::SetGlobalFilter { text } => self.set_global_filter(text),

            Intent::SetFieldFilter { field, filter } => self.set_field_filter(field, filter),

            Intent::AddConstraint { field, constraint } => self.add_constraint(field, constraint),

            Intent::RemoveConstraint { field, index } => {
                if let Err(e) = self.remove_constraint(field, index) {
                    return rejected(e.to_string());
                }
            }

            Intent::SetFieldOperator { field, operator } => self.set_field_operator(field, operator),

            Intent::ClearFilters => self.clear_filters(),

            Intent::SetSort { sort } => self.set_sort(sort),

            Intent::ToggleSort { field } => self.toggle_sort(field),

            Intent::SetSelection { ids } => self.set_selection(ids),

            Intent::AddRecord { candidate } => {
                return match self.add_record(&candidate) {
                    Ok(record) => Response::RecordAdded { record },
                    Err(errors) => {
                        log::warn!(
                            "rejected sale: {}",
                            errors
                                .iter()
                                .map(|e| e.to_string())
                                .collect::<Vec<_>>()
                                .join(", ")
                        );
                        Response::ValidationFailed { errors }
                    }
                };
            }

            Intent::DeleteSelected => {
                return Response::Deleted {
                    count: self.delete_selected(),
                };
            }

            Intent::SetPage { page } => {
                if let Err(e) = self.set_page(page) {
                    return rejected(e.to_string());
                }
            }

            Intent::SetPageSize { page_size } => {
                if let Err(e) = self.set_page_size(page_size) {
                    return rejected(e.to_string());
                }
            }
        }

        Response::Snapshot {
            snapshot: self.snapshot(),
        }
    }

    /// Decode a JSON intent, apply it and encode the response.
    pub fn dispatch_json(&mut self, text: &str) -> String {
        let response = match serde_json::from_str::<Intent>(text) {
            Ok(intent) => self.dispatch(intent),
            Err(e) => rejected(format!("Invalid message: {}", e)),
        };

        serde_json::to_string(&response).unwrap_or_else(|e| {
            serde_json::json!({ "type": "Error", "message": e.to_string() }).to_string()
        })
    }
}

fn rejected(message: String) -> Response {
    log::warn!("rejected intent: {}", message);
    Response::Error { message }
}
