//! Front-end asset manifest: the stylesheet and script every page loads,
//! plus the configuration object handed to client-side code.

use serde::Serialize;

use crate::formatting::esc_attr;
use crate::plugin::VERSION;
use crate::types::Timestamp;

/// Handle shared by the stylesheet and the script.
pub const FRONT_HANDLE: &str = "drippress-front";

/// Script the front-end bundle depends on.
pub const SCRIPT_DEPENDENCY: &str = "jquery";

/// Global variable the client configuration is assigned to.
pub const LOCALIZED_OBJECT_NAME: &str = "dppressLocal";

/// Configuration exposed to client-side code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizedConfig {
    pub ajaxurl: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleAsset {
    pub handle: &'static str,
    pub src: String,
    pub version: String,
    pub media: &'static str,
}

/// A library script that must load before the bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptDependency {
    pub handle: &'static str,
    pub src: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptAsset {
    pub handle: &'static str,
    pub src: String,
    pub version: String,
    pub deps: Vec<ScriptDependency>,
    pub in_footer: bool,
    pub localized: LocalizedConfig,
}

/// The assets enqueued on every front-end page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetManifest {
    pub style: StyleAsset,
    pub script: ScriptAsset,
}

impl AssetManifest {
    /// Build the manifest. In debug mode the unminified build is used and
    /// the version is the current unix time so browsers never cache it.
    /// `dependency_url` is where the [`SCRIPT_DEPENDENCY`] library is served.
    pub fn build(
        script_debug: bool,
        assets_url: &str,
        ajax_url: &str,
        dependency_url: &str,
        now: Timestamp,
    ) -> Self {
        let assets_url = assets_url.trim_end_matches('/');
        let (file_build, version) = if script_debug {
            (FRONT_HANDLE.to_string(), now.timestamp().to_string())
        } else {
            (format!("{FRONT_HANDLE}.min"), VERSION.to_string())
        };

        Self {
            style: StyleAsset {
                handle: FRONT_HANDLE,
                src: format!("{assets_url}/css/{file_build}.css"),
                version: version.clone(),
                media: "all",
            },
            script: ScriptAsset {
                handle: FRONT_HANDLE,
                src: format!("{assets_url}/js/{file_build}.js"),
                version,
                deps: vec![ScriptDependency {
                    handle: SCRIPT_DEPENDENCY,
                    src: dependency_url.to_string(),
                }],
                in_footer: true,
                localized: LocalizedConfig {
                    ajaxurl: ajax_url.to_string(),
                },
            },
        }
    }

    /// `<link>` tag for the document head.
    pub fn head_tags(&self) -> String {
        format!(
            "<link rel=\"stylesheet\" id=\"{handle}-css\" href=\"{src}?ver={ver}\" media=\"{media}\" />\n",
            handle = self.style.handle,
            src = esc_attr(&self.style.src),
            ver = esc_attr(&self.style.version),
            media = self.style.media,
        )
    }

    /// Dependency scripts, localized configuration and the bundle's
    /// `<script>` tag for the end of the body, in load order.
    pub fn footer_tags(&self) -> String {
        let mut tags: String = self
            .script
            .deps
            .iter()
            .map(|dep| {
                format!(
                    "<script id=\"{handle}-js\" src=\"{src}\"></script>\n",
                    handle = dep.handle,
                    src = esc_attr(&dep.src),
                )
            })
            .collect();

        let config = serde_json::to_string(&self.script.localized)
            .unwrap_or_else(|_| "{}".to_string())
            .replace("</", "<\\/");
        tags.push_str(&format!(
            "<script id=\"{handle}-js-extra\">var {name} = {config};</script>\n\
             <script id=\"{handle}-js\" src=\"{src}?ver={ver}\"></script>\n",
            handle = self.script.handle,
            name = LOCALIZED_OBJECT_NAME,
            src = esc_attr(&self.script.src),
            ver = esc_attr(&self.script.version),
        ));
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const JQUERY: &str = "https://cdn.test/assets/js/jquery.min.js";

    fn now() -> Timestamp {
        chrono::Utc.timestamp_opt(1_800_000_000, 0).unwrap()
    }

    #[test]
    fn production_build_is_minified_and_versioned() {
        let m = AssetManifest::build(false, "https://cdn.test/assets/", "https://site.test/ajax", JQUERY, now());
        assert_eq!(m.style.src, "https://cdn.test/assets/css/drippress-front.min.css");
        assert_eq!(m.script.src, "https://cdn.test/assets/js/drippress-front.min.js");
        assert_eq!(m.style.version, VERSION);
        assert_eq!(m.script.deps.len(), 1);
        assert_eq!(m.script.deps[0].handle, "jquery");
        assert_eq!(m.script.deps[0].src, JQUERY);
        assert!(m.script.in_footer);
    }

    #[test]
    fn debug_build_is_unminified_and_time_versioned() {
        let m = AssetManifest::build(true, "https://cdn.test/assets", "https://site.test/ajax", JQUERY, now());
        assert_eq!(m.style.src, "https://cdn.test/assets/css/drippress-front.css");
        assert_eq!(m.script.version, "1800000000");
    }

    #[test]
    fn footer_exposes_ajax_url() {
        let m = AssetManifest::build(false, "/assets", "https://site.test/ajax", JQUERY, now());
        let tags = m.footer_tags();
        assert!(tags.contains(r#"var dppressLocal = {"ajaxurl":"https://site.test/ajax"};"#));
        assert!(tags.contains("/assets/js/drippress-front.min.js?ver="));
    }

    #[test]
    fn dependency_loads_before_the_bundle() {
        let m = AssetManifest::build(false, "/assets", "/ajax", JQUERY, now());
        let tags = m.footer_tags();

        let dep = tags
            .find(r#"<script id="jquery-js" src="https://cdn.test/assets/js/jquery.min.js"></script>"#)
            .expect("dependency tag rendered");
        let config = tags.find("var dppressLocal").expect("config rendered");
        let bundle = tags.find("drippress-front.min.js").expect("bundle rendered");
        assert!(dep < config && config < bundle);
    }

    #[test]
    fn head_links_stylesheet() {
        let m = AssetManifest::build(false, "/assets", "/ajax", JQUERY, now());
        assert!(m
            .head_tags()
            .contains(r#"href="/assets/css/drippress-front.min.css?ver="#));
    }
}
