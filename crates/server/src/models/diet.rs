//! Diet menu request model.

use chrono::{DateTime, Utc};

use tandoori_core::{DietRequestId, DietStatus, UserId};

/// A diet plan request submitted by a user and reviewed by an admin.
#[derive(Debug, Clone)]
pub struct DietRequest {
    pub id: DietRequestId,
    pub user_id: UserId,
    pub name: String,
    pub shift: String,
    pub mobile: String,
    pub days: String,
    pub months: String,
    pub liquids: String,
    pub nonveg: String,
    pub food_items: String,
    pub status: DietStatus,
    pub created_at: DateTime<Utc>,
}

impl DietRequest {
    /// Render the request as the plain-text file offered for download once
    /// an admin has accepted it.
    #[must_use]
    pub fn as_download_text(&self) -> String {
        format!(
            "Diet Menu Request\n\
             -----------------\n\
             Name: {}\n\
             Shift: {}\n\
             Mobile: {}\n\
             Days: {}\n\
             Months: {}\n\
             Liquids: {}\n\
             Non-Veg: {}\n\
             Food Items: {}\n\
             Status: {}\n\
             Submitted At: {}\n",
            self.name,
            self.shift,
            self.mobile,
            self.days,
            self.months,
            self.liquids,
            self.nonveg,
            self.food_items,
            self.status,
            self.created_at.format("%Y-%m-%d %H:%M:%S"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_text_contains_fields() {
        let request = DietRequest {
            id: DietRequestId::new(1),
            user_id: UserId::new(2),
            name: "Asha".to_owned(),
            shift: "Morning".to_owned(),
            mobile: "9999999999".to_owned(),
            days: "5".to_owned(),
            months: "2".to_owned(),
            liquids: "Yes".to_owned(),
            nonveg: "No".to_owned(),
            food_items: "Oats, Dal".to_owned(),
            status: DietStatus::Accepted,
            created_at: Utc::now(),
        };

        let text = request.as_download_text();
        assert!(text.contains("Name: Asha"));
        assert!(text.contains("Status: Accept"));
        assert!(text.contains("Food Items: Oats, Dal"));
    }
}
