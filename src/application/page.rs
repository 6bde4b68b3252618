use std::sync::Arc;

use crate::application::compose::CompositionService;
use crate::infra::site::{SiteStore, SiteStoreError};

/// Loads page markup from the site root and runs it through composition.
#[derive(Clone)]
pub struct PageService {
    site: Arc<SiteStore>,
    composer: CompositionService,
}

impl PageService {
    pub fn new(site: Arc<SiteStore>, composer: CompositionService) -> Self {
        Self { site, composer }
    }

    /// Render the page named by the request path. A missing `.html` suffix
    /// is appended, and the page's file stem becomes the section the
    /// compositor filters on. `Ok(None)` means the page does not exist.
    pub async fn render_page(&self, name: &str) -> Result<Option<String>, SiteStoreError> {
        let file = if name.ends_with(".html") {
            name.to_string()
        } else {
            format!("{name}.html")
        };

        let Some(html) = self.site.read_page(&file).await? else {
            return Ok(None);
        };

        let section = file.strip_suffix(".html").unwrap_or(&file);
        Ok(Some(self.composer.compose(&html, section)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::content::ContentStore;
    use crate::domain::content::ContentItem;
    use std::io::Write;

    fn page_service(dir: &tempfile::TempDir, items: Vec<ContentItem>) -> PageService {
        let store = Arc::new(ContentStore::new());
        for item in items {
            store.push(item);
        }
        let site = Arc::new(SiteStore::new(dir.path().to_path_buf()));
        PageService::new(site, CompositionService::new(store))
    }

    fn write_page(dir: &tempfile::TempDir, file: &str, html: &str) {
        let mut f = std::fs::File::create(dir.path().join(file)).expect("create page");
        f.write_all(html.as_bytes()).expect("write page");
    }

    #[tokio::test]
    async fn section_is_derived_from_the_file_stem() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_page(&dir, "deals.html", r#"<div data-inject="hero"></div>"#);

        let scoped = ContentItem {
            target: Some("hero".into()),
            section: Some("deals".into()),
            title: Some("only for deals".into()),
            ..ContentItem::default()
        };
        let service = page_service(&dir, vec![scoped]);

        let html = service
            .render_page("deals")
            .await
            .expect("read")
            .expect("page exists");
        assert!(html.contains("only for deals"));
    }

    #[tokio::test]
    async fn missing_page_yields_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = page_service(&dir, Vec::new());

        let result = service.render_page("absent").await.expect("read");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn html_suffix_is_not_doubled() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_page(&dir, "about.html", "<p>about</p>");

        let service = page_service(&dir, Vec::new());
        let html = service
            .render_page("about.html")
            .await
            .expect("read")
            .expect("page exists");
        assert_eq!(html, "<p>about</p>");
    }
}
