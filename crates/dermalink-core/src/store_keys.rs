//! Object-store key/path conventions.
//!
//! Pure string functions — no AWS SDK dependency. These define the canonical
//! layout of objects in the Dermalink bucket: the catalog team maintains the
//! `catalog/` prefix, the engine writes under `reports/` and `matches/`.

use uuid::Uuid;

pub fn report(patient_id: Uuid, report_id: Uuid) -> String {
    format!("reports/{patient_id}/{report_id}.json")
}

pub fn patient_reports_prefix(patient_id: Uuid) -> String {
    format!("reports/{patient_id}/")
}

pub fn match_result(report_id: Uuid, solution_id: &str) -> String {
    format!("matches/{report_id}/{solution_id}.json")
}

pub fn report_matches_prefix(report_id: Uuid) -> String {
    format!("matches/{report_id}/")
}

pub const PROTOCOLS: &str = "catalog/protocols.json";

pub const PROVIDERS: &str = "catalog/providers.json";

pub const TRENDING: &str = "catalog/trending.json";

pub const INVENTORY: &str = "catalog/inventory.json";
