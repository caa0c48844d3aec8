//! Station endpoints: CRUD, advisory session lookup, and the ordered
//! checklist/reason save calls.

use serde::Serialize;

use super::client::{Client, ItemsEnvelope};
use super::error::ApiError;
use crate::types::{ActiveSession, ChecklistItem, Station, StationReason};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStation {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationUpdate {
    pub code: String,
    pub name: String,
}

/// Wire shape of a checklist save: both ordered sides in one atomic call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChecklistsBody<'a> {
    start: &'a [ChecklistItem],
    end: &'a [ChecklistItem],
}

#[derive(Debug, Serialize)]
struct ReasonsBody<'a> {
    items: &'a [StationReason],
}

impl Client {
    pub async fn list_stations(&self) -> Result<Vec<Station>, ApiError> {
        let envelope: ItemsEnvelope<Station> = self.get_json("/stations").await?;
        Ok(envelope.items)
    }

    pub async fn create_station(&self, station: &NewStation) -> Result<Station, ApiError> {
        self.post_json("/stations", station).await
    }

    pub async fn update_station(
        &self,
        id: &str,
        update: &StationUpdate,
    ) -> Result<(), ApiError> {
        self.put_unit(&format!("/stations/{id}"), update).await
    }

    pub async fn delete_station(&self, id: &str) -> Result<(), ApiError> {
        self.delete_unit(&format!("/stations/{id}")).await
    }

    /// Advisory check before destructive edits. The backend may still
    /// reject the follow-up call with a domain code.
    pub async fn station_active_session(&self, id: &str) -> Result<ActiveSession, ApiError> {
        self.get_json(&format!("/stations/{id}/active-session")).await
    }

    pub async fn fetch_checklists(
        &self,
        id: &str,
    ) -> Result<(Vec<ChecklistItem>, Vec<ChecklistItem>), ApiError> {
        #[derive(serde::Deserialize)]
        struct Body {
            #[serde(default)]
            start: Vec<ChecklistItem>,
            #[serde(default)]
            end: Vec<ChecklistItem>,
        }
        let body: Body = self.get_json(&format!("/stations/{id}/checklists")).await?;
        Ok((body.start, body.end))
    }

    /// Persist both checklist sides as ordered lists. The caller refreshes
    /// authoritative state afterwards; this call owns no cache.
    pub async fn save_checklists(
        &self,
        id: &str,
        start: &[ChecklistItem],
        end: &[ChecklistItem],
    ) -> Result<(), ApiError> {
        self.put_unit(
            &format!("/stations/{id}/checklists"),
            &ChecklistsBody { start, end },
        )
        .await
    }

    pub async fn fetch_reasons(&self, id: &str) -> Result<Vec<StationReason>, ApiError> {
        let envelope: ItemsEnvelope<StationReason> =
            self.get_json(&format!("/stations/{id}/reasons")).await?;
        Ok(envelope.items)
    }

    pub async fn save_reasons(
        &self,
        id: &str,
        reasons: &[StationReason],
    ) -> Result<(), ApiError> {
        self.put_unit(&format!("/stations/{id}/reasons"), &ReasonsBody { items: reasons })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChecklistItem;

    #[test]
    fn test_checklists_body_wire_shape() {
        let start = vec![ChecklistItem::new("a", "בדיקת שמן", "Проверка масла", 0)];
        let end = vec![ChecklistItem::new("b", "ניקוי", "Уборка", 0)];
        let json = serde_json::to_value(ChecklistsBody {
            start: &start,
            end: &end,
        })
        .unwrap();
        assert_eq!(json["start"][0]["labelHe"], "בדיקת שמן");
        assert_eq!(json["end"][0]["position"], 0);
    }

    #[test]
    fn test_new_station_serializes_camel_case() {
        let json = serde_json::to_value(NewStation {
            code: "CNC-2".to_string(),
            name: "כרסומת".to_string(),
        })
        .unwrap();
        assert_eq!(json["code"], "CNC-2");
        assert_eq!(json["name"], "כרסומת");
    }
}
