// extras endpoints: the provenance tag.

use serde_json::json;
use tracing::debug;

use crate::client::NetboxClient;
use crate::error::Error;
use crate::models::Tag;

impl NetboxClient {
    /// `GET /api/extras/tags/?slug={slug}`
    pub async fn find_tag(&self, slug: &str) -> Result<Option<Tag>, Error> {
        self.find_one("extras/tags", &[("slug", slug.to_owned())])
            .await
    }

    /// `POST /api/extras/tags/`
    pub async fn create_tag(&self, name: &str, slug: &str) -> Result<Tag, Error> {
        debug!(name, "creating tag");
        self.post("extras/tags", &json!({ "name": name, "slug": slug }))
            .await
    }
}
