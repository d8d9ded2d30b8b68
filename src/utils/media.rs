use crate::config::MediaConfig;
use regex::Regex;
use std::sync::LazyLock;

// 允许的相对 media 路径：字母数字以及 . _ - /，不允许空格和查询串
static MEDIA_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._\-/]+$").expect("valid media path regex"));

/// 卡片图片地址解析
///
/// 优先使用卡片自身的图片，缺失或格式异常时回退到占位图；
/// 任何输入都不会报错。
#[derive(Debug, Clone)]
pub struct MediaResolver {
    public_base_url: Option<String>,
    media_url: String,
    placeholder_image: String,
}

impl MediaResolver {
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            public_base_url: config
                .public_base_url
                .as_deref()
                .map(|s| s.trim().trim_end_matches('/').to_string())
                .filter(|s| !s.is_empty()),
            media_url: normalize_prefix(&config.media_url),
            placeholder_image: config.placeholder_image.clone(),
        }
    }

    /// 解析展示用图片地址。
    /// `request_origin` 形如 `https://host:port`，配置了 public_base_url 时以配置为准。
    pub fn resolve(&self, image: Option<&str>, request_origin: Option<&str>) -> String {
        let origin = self
            .public_base_url
            .as_deref()
            .or(request_origin.map(|o| o.trim_end_matches('/')))
            .filter(|o| !o.is_empty());

        if let Some(path) = image.map(str::trim).filter(|p| !p.is_empty()) {
            if is_absolute_url(path) {
                return path.to_string();
            }
            if let Some(relative) = self.media_path(path) {
                return absolutize(origin, &relative);
            }
            log::warn!("Malformed card image reference, using placeholder: {path:?}");
        }

        if is_absolute_url(&self.placeholder_image) {
            return self.placeholder_image.clone();
        }
        absolutize(origin, &ensure_leading_slash(&self.placeholder_image))
    }

    fn media_path(&self, image: &str) -> Option<String> {
        let path = image.trim_start_matches('/');
        if !MEDIA_PATH_RE.is_match(path) || path.split('/').any(|seg| seg == "..") {
            return None;
        }
        Some(format!("{}{}", self.media_url, path))
    }
}

fn is_absolute_url(s: &str) -> bool {
    (s.starts_with("http://") || s.starts_with("https://")) && !s.contains(char::is_whitespace)
}

fn ensure_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// "/media" / "media/" / "/media/" 统一为 "/media/"
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}

fn absolutize(origin: Option<&str>, path: &str) -> String {
    match origin {
        Some(origin) => format!("{origin}{path}"),
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(base: Option<&str>) -> MediaResolver {
        MediaResolver::new(&MediaConfig {
            public_base_url: base.map(str::to_string),
            ..MediaConfig::default()
        })
    }

    #[test]
    fn test_card_image_uses_request_origin() {
        let r = resolver(None);
        assert_eq!(
            r.resolve(Some("luck_cards/sun.jpg"), Some("http://localhost:8080")),
            "http://localhost:8080/media/luck_cards/sun.jpg"
        );
    }

    #[test]
    fn test_configured_base_wins_over_request() {
        let r = resolver(Some("https://dailysoul.app/"));
        assert_eq!(
            r.resolve(Some("luck_cards/sun.jpg"), Some("http://10.0.0.1")),
            "https://dailysoul.app/media/luck_cards/sun.jpg"
        );
    }

    #[test]
    fn test_missing_image_falls_back_to_placeholder() {
        let r = resolver(None);
        assert_eq!(
            r.resolve(None, Some("http://localhost")),
            "http://localhost/static/images/default-card.jpg"
        );
        assert_eq!(
            r.resolve(Some("   "), Some("http://localhost")),
            "http://localhost/static/images/default-card.jpg"
        );
    }

    #[test]
    fn test_malformed_image_falls_back_to_placeholder() {
        let r = resolver(None);
        for bad in ["../etc/passwd", "luck cards/a.jpg", "a.jpg?x=1", "ftp://x/y.jpg"] {
            assert_eq!(
                r.resolve(Some(bad), Some("http://h")),
                "http://h/static/images/default-card.jpg",
                "input {bad:?}"
            );
        }
    }

    #[test]
    fn test_relative_when_origin_unknown() {
        let r = resolver(None);
        assert_eq!(r.resolve(Some("a.jpg"), None), "/media/a.jpg");
        assert_eq!(r.resolve(None, None), "/static/images/default-card.jpg");
    }

    #[test]
    fn test_absolute_image_kept() {
        let r = resolver(None);
        assert_eq!(
            r.resolve(Some("https://cdn.example.com/a.jpg"), Some("http://h")),
            "https://cdn.example.com/a.jpg"
        );
    }

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix("media"), "/media/");
        assert_eq!(normalize_prefix("/media"), "/media/");
        assert_eq!(normalize_prefix("/"), "/");
    }
}
