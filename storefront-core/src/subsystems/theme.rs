//! Theme derivation: brand color variants and appearance flags.

use super::regional::{TextDirection, active_language, language_direction};
use crate::config::ThemeListener;
use kanau::processor::Processor;
use serde::Serialize;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::sync::Arc;
use storefront_sdk::config::{AppConfig, ThemeSettings};
use tokio::sync::watch;
use tracing::{debug, warn};

/// Derived variants of one brand color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorVariants {
    pub base: String,
    /// `r,g,b`
    pub rgb: String,
    pub contrast: &'static str,
    pub contrast_rgb: &'static str,
    /// 20% darker.
    pub shade: String,
    /// 20% lighter.
    pub tint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeState {
    pub dark: bool,
    pub direction: TextDirection,
    /// `--ion-color-*` custom properties, ready to apply to the document root.
    pub css_variables: BTreeMap<String, String>,
}

impl ThemeState {
    pub fn derive(theme: &ThemeSettings, direction: TextDirection) -> Self {
        let mut css_variables = BTreeMap::new();
        for (name, color) in [
            ("primary", &theme.primary_color),
            ("secondary", &theme.secondary_color),
        ] {
            match color_variants(color) {
                Some(variants) => insert_variants(&mut css_variables, name, variants),
                None => warn!(color = %color, name, "Ignoring malformed theme color"),
            }
        }
        Self {
            dark: theme.dark_mode,
            direction,
            css_variables,
        }
    }
}

fn insert_variants(vars: &mut BTreeMap<String, String>, name: &str, v: ColorVariants) {
    let prefix = format!("--ion-color-{name}");
    vars.insert(format!("{prefix}-rgb"), v.rgb);
    vars.insert(format!("{prefix}-contrast"), v.contrast.to_string());
    vars.insert(format!("{prefix}-contrast-rgb"), v.contrast_rgb.to_string());
    vars.insert(format!("{prefix}-shade"), v.shade);
    vars.insert(format!("{prefix}-tint"), v.tint);
    vars.insert(prefix, v.base);
}

/// Parse `#rrggbb` (leading `#` optional).
pub fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Black on light backgrounds, white on dark ones.
pub fn contrast_color(r: u8, g: u8, b: u8) -> &'static str {
    let luminance = (0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)) / 255.0;
    if luminance > 0.5 { "#000000" } else { "#ffffff" }
}

/// Scale each channel by `percent` (negative darkens), clamped to 0-255.
pub fn shade_color(color: &str, percent: i32) -> Option<String> {
    let (r, g, b) = parse_hex(color)?;
    let scale = |c: u8| {
        let c = f64::from(c);
        (c + c * f64::from(percent) / 100.0).clamp(0.0, 255.0) as u8
    };
    Some(format!("#{:02x}{:02x}{:02x}", scale(r), scale(g), scale(b)))
}

pub fn color_variants(color: &str) -> Option<ColorVariants> {
    let (r, g, b) = parse_hex(color)?;
    let contrast = contrast_color(r, g, b);
    Some(ColorVariants {
        base: color.to_string(),
        rgb: format!("{r},{g},{b}"),
        contrast,
        contrast_rgb: if contrast == "#ffffff" {
            "255,255,255"
        } else {
            "0,0,0"
        },
        shade: shade_color(color, -20)?,
        tint: shade_color(color, 20)?,
    })
}

/// Publishes the derived [`ThemeState`].
///
/// Follows the config stream as a processor, and also reacts synchronously
/// to theme updates as the service's [`ThemeListener`].
pub struct ThemeSubsystem {
    state_tx: watch::Sender<Option<Arc<ThemeState>>>,
}

impl ThemeSubsystem {
    pub fn new() -> Self {
        let (state_tx, _) = watch::channel(None);
        Self { state_tx }
    }

    pub fn state(&self) -> Option<Arc<ThemeState>> {
        self.state_tx.borrow().clone()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<Option<Arc<ThemeState>>> {
        self.state_tx.subscribe()
    }

    fn publish(&self, state: ThemeState) {
        let unchanged = self
            .state_tx
            .borrow()
            .as_deref()
            .is_some_and(|current| current == &state);
        if unchanged {
            debug!("Theme unchanged");
            return;
        }
        self.state_tx.send_replace(Some(Arc::new(state)));
    }
}

impl Default for ThemeSubsystem {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeListener for ThemeSubsystem {
    fn theme_changed(&self, theme: &ThemeSettings) {
        let direction = self
            .state()
            .map(|s| s.direction)
            .unwrap_or(TextDirection::Ltr);
        self.publish(ThemeState::derive(theme, direction));
    }
}

impl Processor<Arc<AppConfig>> for ThemeSubsystem {
    type Output = ();
    type Error = Infallible;

    async fn process(&self, config: Arc<AppConfig>) -> Result<(), Infallible> {
        let direction = language_direction(&active_language(&config));
        self.publish(ThemeState::derive(&config.theme, direction));
        Ok(())
    }
}
