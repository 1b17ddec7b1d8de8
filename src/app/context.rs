use std::io::{BufRead, Write};

use crate::app::error::Result;
use crate::config::{Config, Theme};
use crate::console::Console;
use crate::extractor::Extractor;
use crate::fetcher::{HttpFetcher, SiteUrls};
use crate::menu::Menu;
use crate::session::{Options, Session};
use crate::store::{open_store, FavouriteStore, SqliteStore};

pub struct AppContext {
    pub config: Config,
    pub store: Box<dyn FavouriteStore>,
    pub fetcher: HttpFetcher,
    pub extractor: Extractor,
    pub urls: SiteUrls,
    pub theme: Theme,
}

impl AppContext {
    /// Wire every component from `config`. The favourites backend is chosen
    /// here, once, honouring `EKSI_STORAGE` and `EKSI_DATA_DIR`.
    pub fn new(config: Config, theme: Option<&str>) -> Result<Self> {
        let storage = config.storage.clone().with_env()?;
        let store = open_store(&storage)?;
        Self::with_store(config, store, theme)
    }

    pub fn in_memory(config: Config) -> Result<Self> {
        let store: Box<dyn FavouriteStore> = Box::new(SqliteStore::in_memory()?);
        Self::with_store(config, store, None)
    }

    fn with_store(config: Config, store: Box<dyn FavouriteStore>, theme: Option<&str>) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.site)?;
        let urls = SiteUrls::new(&config.site.base_url)?;
        let extractor = Extractor::new(config.selectors.clone(), urls.base());
        let theme = Theme::resolve(&config.theme, theme);

        Ok(Self {
            config,
            store,
            fetcher,
            extractor,
            urls,
            theme,
        })
    }

    pub fn session<R: BufRead, W: Write>(
        &self,
        input: R,
        console: Console<W>,
        options: Options,
    ) -> Session<'_, HttpFetcher, dyn FavouriteStore, R, W> {
        let menu = Menu::new(input, console, self.config.menu.keys.clone());
        Session::new(
            &self.fetcher,
            self.store.as_ref(),
            &self.extractor,
            &self.urls,
            menu,
            options,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeConfig;

    #[test]
    fn test_in_memory_context() {
        let ctx = AppContext::in_memory(Config::default()).unwrap();
        assert_eq!(ctx.store.backend_name(), "sqlite");
        assert_eq!(ctx.urls.base(), "https://eksisozluk.com");
        assert_eq!(ctx.theme, Theme::default());
    }

    #[test]
    fn test_theme_from_config() {
        let config = Config {
            theme: ThemeConfig {
                name: "green".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let ctx = AppContext::in_memory(config).unwrap();
        assert_eq!(ctx.theme, Theme::green());
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = Config::default();
        config.site.base_url = "not a url".to_string();
        assert!(AppContext::in_memory(config).is_err());
    }

    #[tokio::test]
    async fn test_session_over_saved_favourites() {
        let ctx = AppContext::in_memory(Config::default()).unwrap();
        let options = Options {
            showfavs: true,
            ..Default::default()
        };

        let mut session = ctx.session(&b"q\n"[..], Console::plain(Vec::new()), options);
        session.run().await.unwrap();

        let out = String::from_utf8(session.into_menu().into_console().into_inner()).unwrap();
        assert!(out.contains("No favourite entries"));
    }
}
