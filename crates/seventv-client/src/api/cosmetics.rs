use serde_json::Value;

use super::SevenTvClient;

impl SevenTvClient {
    /// Fetch a paint by ID. `None` on any failure.
    pub async fn get_paint(&self, paint_id: &str) -> Option<Value> {
        let url = self.endpoint(&["paints", paint_id]);
        self.get_optional(url).await
    }

    /// Fetch a badge by ID. `None` on any failure.
    pub async fn get_badge(&self, badge_id: &str) -> Option<Value> {
        let url = self.endpoint(&["badges", badge_id]);
        self.get_optional(url).await
    }
}
