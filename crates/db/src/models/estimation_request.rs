//! Estimation request entity model and DTOs.

use chrono::NaiveDate;
use estimation_core::types::{DbId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `estimation_requests` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct EstimationRequest {
    pub id: DbId,
    pub request_date: NaiveDate,
    pub desired_estimation_date: Option<NaiveDate>,
    pub project_name: String,
    pub zac_project_number: Option<String>,
    pub sales_person: Option<String>,
    pub estimation_person: Option<String>,
    pub status: String,
    pub estimation: Option<String>,
    pub completion_date: Option<NaiveDate>,
    pub remarks: Option<String>,
    pub estimation_materials: Option<String>,
    pub box_url: Option<String>,
    pub others: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for filing a new estimation request.
///
/// Length limits mirror the column widths.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEstimationRequest {
    pub request_date: NaiveDate,
    pub desired_estimation_date: Option<NaiveDate>,
    #[validate(length(min = 1, max = 255))]
    pub project_name: String,
    #[validate(length(max = 100))]
    pub zac_project_number: Option<String>,
    #[validate(length(max = 100))]
    pub sales_person: Option<String>,
    #[validate(length(max = 100))]
    pub estimation_person: Option<String>,
    /// Defaults to the first catalog label if omitted.
    #[validate(length(max = 50))]
    pub status: Option<String>,
    pub estimation: Option<String>,
    pub completion_date: Option<NaiveDate>,
    pub remarks: Option<String>,
    pub estimation_materials: Option<String>,
    #[validate(length(max = 500))]
    pub box_url: Option<String>,
    pub others: Option<String>,
}

/// Partial update for an estimation request.
///
/// A field left out of the payload keeps its stored value. Nullable columns
/// use `Option<Option<T>>`: `Some(None)` (an explicit JSON `null`) clears the
/// column. `request_date`, `project_name` and `status` cannot be cleared, so a
/// `null` for them is treated the same as leaving them out.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateEstimationRequest {
    pub request_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub desired_estimation_date: Option<Option<NaiveDate>>,
    #[validate(length(min = 1, max = 255))]
    pub project_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[validate(length(max = 100))]
    pub zac_project_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[validate(length(max = 100))]
    pub sales_person: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[validate(length(max = 100))]
    pub estimation_person: Option<Option<String>>,
    #[validate(length(max = 50))]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub estimation: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub completion_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub remarks: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub estimation_materials: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[validate(length(max = 500))]
    pub box_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub others: Option<Option<String>>,
}

impl UpdateEstimationRequest {
    /// Overwrite the fields of `target` that this patch carries.
    ///
    /// Leaves `id` and both timestamps alone.
    pub fn apply_to(&self, target: &mut EstimationRequest) {
        fn set<T: Clone>(slot: &mut T, value: &Option<T>) {
            if let Some(v) = value {
                *slot = v.clone();
            }
        }

        set(&mut target.request_date, &self.request_date);
        set(&mut target.desired_estimation_date, &self.desired_estimation_date);
        set(&mut target.project_name, &self.project_name);
        set(&mut target.zac_project_number, &self.zac_project_number);
        set(&mut target.sales_person, &self.sales_person);
        set(&mut target.estimation_person, &self.estimation_person);
        set(&mut target.status, &self.status);
        set(&mut target.estimation, &self.estimation);
        set(&mut target.completion_date, &self.completion_date);
        set(&mut target.remarks, &self.remarks);
        set(&mut target.estimation_materials, &self.estimation_materials);
        set(&mut target.box_url, &self.box_url);
        set(&mut target.others, &self.others);
    }
}

/// Present-but-null deserializes to `Some(None)` instead of `None`.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Query parameters for listing estimation requests (`?skip=&limit=`).
///
/// `skip` defaults to 0. `limit` defaults to
/// [`DEFAULT_LIMIT`](estimation_core::pagination::DEFAULT_LIMIT) and is capped
/// at [`MAX_LIMIT`](estimation_core::pagination::MAX_LIMIT): asking for more
/// returns at most that many rows, without an error. Negative values are
/// treated as 0.
#[derive(Debug, Default, Deserialize)]
pub struct EstimationRequestListParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
