use crate::format::human_size;
use crate::github::api::SizeProvider;
use crate::github::types::RepoSlug;
use crate::page::surface::{detect_anchor, PageSurface};
use crate::page::types::StatContent;
use crate::settings::store::{SettingsStore, AUTO_PROMPT_KEY, TOKEN_KEY};

/// Orchestrates size resolution and the one-time page mutation
///
/// One controller serves one page view at a time; each navigation event
/// re-enters [`inject`] on a fresh view. The injected marker node is the
/// authoritative "already resolved" state; the controller keeps no
/// in-memory flag, since the page outlives script state across
/// navigations.
///
/// Overlapping invocations (e.g. load racing a rapid navigation) can
/// both pass the marker check before either renders; there is no
/// cancellation. The check-then-render sequence is kept as its own
/// guarded step rather than relying on timing.
///
/// [`inject`]: InjectionController::inject
pub struct InjectionController<P, S> {
    page: P,
    store: S,
    provider: SizeProvider,
}

impl<P: PageSurface, S: SettingsStore> InjectionController<P, S> {
    pub fn new(page: P, store: S, provider: SizeProvider) -> Self {
        Self {
            page,
            store,
            provider,
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// Run the resolution pipeline for the current page view
    ///
    /// Halts silently on non-repository pages, unknown layouts, an
    /// existing marker, and provider failure (the latter leaves no
    /// marker, so a later trigger may retry). Only storage failures
    /// surface as `Err`.
    pub async fn inject(&mut self) -> Result<(), String> {
        let Some(slug) = RepoSlug::from_path(&self.page.path()) else {
            log::trace!("Not a repository page, nothing to inject");
            return Ok(());
        };

        let Some(anchor) = detect_anchor(&self.page) else {
            log::trace!("No known stats anchor on this page layout");
            return Ok(());
        };

        // Nothing to do if this page view already resolved
        if self.page.has_marker() {
            return Ok(());
        }

        let token = self.store.get(TOKEN_KEY).await?;

        if token.is_none() && self.page.is_private() {
            let auto_prompt = self.store.get(AUTO_PROMPT_KEY).await?;
            if auto_prompt.as_deref() != Some("false") {
                self.open_prompt();
            }

            // The placeholder carries the marker id, so re-entry on this
            // page view is guarded from here on
            self.page.append_stat(anchor, StatContent::MissingToken);
            return Ok(());
        }

        let Some(kilobytes) = self.provider.resolve_size(&slug, token.as_deref()).await else {
            return Ok(());
        };

        let human = human_size(kilobytes * 1024);
        log::trace!(
            "Resolved {}/{} at {} {}",
            slug.owner,
            slug.name,
            human.value,
            human.unit
        );
        self.page.append_stat(anchor, StatContent::Size(human));
        Ok(())
    }

    /// Open the credential prompt dialog
    pub fn open_prompt(&mut self) {
        self.page.set_prompt_open(true);
    }

    /// Close the prompt without saving a token
    ///
    /// A manual dismiss opts out of future automatic prompts; the manual
    /// reopen affordance on the injected stat node stays clickable.
    pub async fn dismiss_prompt(&mut self) -> Result<(), String> {
        self.page.set_prompt_open(false);
        self.store.set(AUTO_PROMPT_KEY, "false").await
    }

    /// Persist the prompt's input as the token and retry resolution
    ///
    /// The value is stored as-is, empty included. On the same page view
    /// the retry lands on the placeholder's marker guard; the saved
    /// token takes effect on the next page view.
    pub async fn submit_token(&mut self) -> Result<(), String> {
        let token = self.page.prompt_input();
        self.store.set(TOKEN_KEY, &token).await?;
        self.dismiss_prompt().await?;
        self.inject().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::HumanSize;
    use crate::page::testing::FakePage;
    use crate::page::types::StatsAnchor;
    use crate::settings::store::testing::MemoryStore;

    fn offline_provider() -> SizeProvider {
        // Nothing listens on this port; tests that reach the provider
        // use a mock server instead
        SizeProvider::with_endpoints("http://127.0.0.1:1", "http://127.0.0.1:1")
    }

    #[tokio::test]
    async fn test_non_repository_page_is_untouched() {
        let page = FakePage::public_repo("settings");
        let mut controller =
            InjectionController::new(page, MemoryStore::default(), offline_provider());

        controller.inject().await.unwrap();
        assert!(controller.page().appended.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_layout_is_untouched() {
        let page = FakePage::unknown_layout("octocat/hello-world");
        let mut controller =
            InjectionController::new(page, MemoryStore::default(), offline_provider());

        controller.inject().await.unwrap();
        assert!(controller.page().appended.is_empty());
    }

    #[tokio::test]
    async fn test_second_invocation_is_idempotent() {
        let page = FakePage::private_repo("octocat/secret");
        let mut controller =
            InjectionController::new(page, MemoryStore::default(), offline_provider());

        controller.inject().await.unwrap();
        controller.inject().await.unwrap();

        assert_eq!(controller.page().appended.len(), 1);
    }

    #[tokio::test]
    async fn test_private_without_token_prompts_and_renders_placeholder() {
        let page = FakePage::private_repo("octocat/secret");
        let mut controller =
            InjectionController::new(page, MemoryStore::default(), offline_provider());

        controller.inject().await.unwrap();

        assert!(controller.page().prompt_open);
        assert_eq!(
            controller.page().appended,
            vec![(StatsAnchor::LegacyList, StatContent::MissingToken)]
        );
    }

    #[tokio::test]
    async fn test_opted_out_private_page_does_not_auto_prompt() {
        let page = FakePage::private_repo("octocat/secret");
        let store = MemoryStore::with(AUTO_PROMPT_KEY, "false");
        let mut controller = InjectionController::new(page, store, offline_provider());

        controller.inject().await.unwrap();

        assert!(!controller.page().prompt_open);
        assert_eq!(
            controller.page().appended,
            vec![(StatsAnchor::LegacyList, StatContent::MissingToken)]
        );
    }

    #[tokio::test]
    async fn test_dismiss_closes_prompt_and_persists_opt_out() {
        let page = FakePage::private_repo("octocat/secret");
        let store = MemoryStore::default();
        let mut controller = InjectionController::new(page, &store, offline_provider());

        controller.open_prompt();
        controller.dismiss_prompt().await.unwrap();

        assert!(!controller.page().prompt_open);
        assert_eq!(
            store.get(AUTO_PROMPT_KEY).await.unwrap(),
            Some("false".to_string())
        );
    }

    #[tokio::test]
    async fn test_dismissal_opts_out_on_later_page_views() {
        let store = MemoryStore::default();

        let page = FakePage::private_repo("octocat/secret");
        let mut controller = InjectionController::new(page, &store, offline_provider());
        controller.inject().await.unwrap();
        assert!(controller.page().prompt_open);
        controller.dismiss_prompt().await.unwrap();

        // Another private repository, same stored settings: placeholder
        // still renders, but the prompt stays closed
        let page = FakePage::private_repo("octocat/other-secret");
        let mut controller = InjectionController::new(page, &store, offline_provider());
        controller.inject().await.unwrap();

        assert!(!controller.page().prompt_open);
        assert_eq!(
            controller.page().appended,
            vec![(StatsAnchor::LegacyList, StatContent::MissingToken)]
        );
    }

    #[tokio::test]
    async fn test_public_repo_renders_anonymous_size() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/octocat/hello-world")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"size":2048}"#)
            .create_async()
            .await;

        let page = FakePage::public_repo("octocat/hello-world");
        let provider = SizeProvider::with_endpoints(&server.url(), &server.url());
        let mut controller = InjectionController::new(page, MemoryStore::default(), provider);

        controller.inject().await.unwrap();

        mock.assert_async().await;
        // 2048 KiB of disk usage reads as 2.00 MiB
        assert_eq!(
            controller.page().appended,
            vec![(
                StatsAnchor::LegacyList,
                StatContent::Size(HumanSize {
                    value: "2.00".to_string(),
                    unit: "MiB",
                })
            )]
        );
    }

    #[tokio::test]
    async fn test_refreshed_layout_anchors_the_refreshed_list() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/octocat/hello-world")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"size":1}"#)
            .create_async()
            .await;

        let page = FakePage::refreshed_repo("octocat/hello-world");
        let provider = SizeProvider::with_endpoints(&server.url(), &server.url());
        let mut controller = InjectionController::new(page, MemoryStore::default(), provider);

        controller.inject().await.unwrap();

        assert_eq!(
            controller.page().appended[0].0,
            StatsAnchor::RefreshedList
        );
    }

    #[tokio::test]
    async fn test_provider_failure_leaves_no_marker() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/octocat/hello-world")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let page = FakePage::public_repo("octocat/hello-world");
        let provider = SizeProvider::with_endpoints(&server.url(), &server.url());
        let mut controller = InjectionController::new(page, MemoryStore::default(), provider);

        controller.inject().await.unwrap();

        assert!(controller.page().appended.is_empty());
        assert!(!controller.page().has_marker());
    }

    #[tokio::test]
    async fn test_submitted_token_is_used_on_the_next_page_view() {
        let mut server = mockito::Server::new_async().await;
        let graphql_url = format!("{}/graphql", server.url());
        let mock = server
            .mock("POST", "/graphql")
            .match_header("authorization", "Bearer ghp_secret")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":{"repository":{"diskUsage":1024}}}"#)
            .create_async()
            .await;

        let store = MemoryStore::default();

        // First page view: private, no token, placeholder + prompt
        let mut page = FakePage::private_repo("octocat/secret");
        page.prompt_value = "ghp_secret".to_string();
        let mut controller = InjectionController::new(page, &store, offline_provider());
        controller.inject().await.unwrap();
        assert!(controller.page().prompt_open);

        // Submit stores the token, closes the prompt, and re-enters;
        // the re-entry lands on the placeholder's marker guard
        controller.submit_token().await.unwrap();
        assert!(!controller.page().prompt_open);
        assert_eq!(controller.page().appended.len(), 1);
        assert_eq!(
            store.get(TOKEN_KEY).await.unwrap(),
            Some("ghp_secret".to_string())
        );

        // Next page view resolves through the authenticated endpoint
        let page = FakePage::private_repo("octocat/secret");
        let provider = SizeProvider::with_endpoints(&server.url(), &graphql_url);
        let mut controller = InjectionController::new(page, &store, provider);
        controller.inject().await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            controller.page().appended,
            vec![(
                StatsAnchor::LegacyList,
                StatContent::Size(HumanSize {
                    value: "1.00".to_string(),
                    unit: "MiB",
                })
            )]
        );
    }

    #[tokio::test]
    async fn test_empty_submission_is_stored_verbatim() {
        let store = MemoryStore::default();
        let page = FakePage::private_repo("octocat/secret");
        let mut controller = InjectionController::new(page, &store, offline_provider());

        controller.inject().await.unwrap();
        controller.submit_token().await.unwrap();

        assert_eq!(store.get(TOKEN_KEY).await.unwrap(), Some(String::new()));
    }
}
