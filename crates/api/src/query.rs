//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters of `GET /records/list`.
///
/// Parsed with `axum_extra::extract::Query` so that repeated keys collect
/// into a `Vec`. The exam filter may be spelled `exams[]=a` or `exams=a`,
/// and both spellings may appear in one query. `limit` stays a raw string:
/// unusable values fall back to the default page size instead of failing
/// the request.
#[derive(Debug, Default, Deserialize)]
pub struct UnreviewedParams {
    pub limit: Option<String>,
    #[serde(default, rename = "exams[]")]
    pub exams_bracketed: Vec<String>,
    #[serde(default)]
    pub exams: Vec<String>,
}

impl UnreviewedParams {
    /// Every exam value given, under either spelling.
    pub fn exam_values(self) -> Vec<String> {
        let mut values = self.exams_bracketed;
        values.extend(self.exams);
        values
    }
}
