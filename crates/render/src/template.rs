//! Markdown fragment rendering for resolved extensions.
//!
//! Merges a [`ResolvedExtension`] into a user-editable [upon] template. The
//! template syntax follows upon's Mustache-like conventions (`{{ variable }}`,
//! `{{ value|formatter }}`, `{% if %}…{% else %}…{% endif %}`), extended with
//! number-formatting helpers:
//!
//! - **`grouped`** — Parses the value as a float and formats it with the
//!   active locale's grouping separators (`1234567` → `1,234,567`).
//! - **`fixed`** — Parses the value as a float and formats it to exactly one
//!   decimal place (`1234.567` → `1234.6`).
//! - **`present`** — Function usable in conditions (`{% if present(x) %}`);
//!   `true` when the value would render as non-empty content (used with the
//!   always-addressable asset keys to fall back to a default icon).
//!
//! # Template Variables
//!
//! | Variable                          | Type             | Description                               |
//! |-----------------------------------|------------------|-------------------------------------------|
//! | `name`                            | `String`         | The identifier name as the user typed it  |
//! | `extension.display_name`          | `String`         | Marketplace display name                  |
//! | `extension.extension_name`        | `String`         | Name without the publisher prefix         |
//! | `extension.short_description`     | `String`         | Listing summary                           |
//! | `extension.publisher.display_name`| `String`         | Publisher display name                    |
//! | `extension.statistics.N.value`    | `f64`            | N-th gallery statistic, by list index     |
//! | `version.version`                 | `String`         | The selected version string               |
//! | `assets.<Normalized_Asset_Type>`  | `String`/none    | Source URL; well-known keys always exist  |
//! | `stats.install`                   | `f64`            | Install count (0 when the gallery omits it)|
//! | `stats.rating`                    | `f64`            | Weighted rating, falling back to average  |

use crate::error::{ErrorKind, Result};
use crate::fragment::Fragment;
use crate::numbers::NumberLocale;
use extdown_catalog::consts::asset;
use extdown_catalog::{ResolvedExtension, normalize_asset_type};
use exn::ResultExt;
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::instrument;
use upon::{Engine, Template};

// Literal macro so the constant and the default template share one source.
macro_rules! default_icon_url {
    () => {
        "https://cdn.vsassets.io/v/M176_20201014.2/_content/Header/default_icon.png"
    };
}

/// Icon shown when a version carries no small-icon asset.
pub const DEFAULT_ICON_URL: &str = default_icon_url!();

/// The out-of-the-box template: a Markdown block per extension with a linked
/// heading, icon (with fallback), publisher, install count, rating and short
/// description. Fully overridable at runtime.
pub const DEFAULT_TEMPLATE: &str = concat!(
    r#"### [{{ extension.display_name }}](https://marketplace.visualstudio.com/items?itemName={{ name }}) {{ version.version }}

<table>
  <tbody>
    <tr>
      <td rowspan="2" style="width:74px;height:74px;padding:2px"> <img style="width:72px;height:72px" src="{% if present(assets.Microsoft_VisualStudio_Services_Icons_Small) %}{{ assets.Microsoft_VisualStudio_Services_Icons_Small }}{% else %}"#,
    default_icon_url!(),
    r#"{% endif %}"></td>
      <td>{{ name }} By: {{ extension.publisher.display_name }} Install: {{ stats.install | grouped }} Rate: {{ stats.rating | fixed }}</td>
    </tr>
    <tr>
      <td>{{ extension.short_description }}</td>
    </tr>
  </tbody>
</table>


****
"#
);

/// Renders [`Fragment`]s from resolved extensions using a user-defined
/// template string.
///
/// Constructed via [`FromStr`] (or [`with_locale`](Self::with_locale)),
/// which compiles the template eagerly so that syntax errors surface once at
/// creation time — the single global template error of a pass — rather than
/// once per fragment at render time. The compiled template is reusable
/// across every fragment of a pass.
pub struct FragmentRenderer {
    engine: Engine<'static>,
    template: Template<'static>,
}
impl FromStr for FragmentRenderer {
    type Err = crate::error::Error;

    /// Compiles the template with the default (`en-US`) number locale.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::with_locale(s, NumberLocale::default())
    }
}
impl FragmentRenderer {
    /// Compiles the given template, registering the `grouped`/`fixed`
    /// formatters against the given locale and the `present` function.
    /// Returns [`ErrorKind::Template`] if the template syntax is invalid.
    pub fn with_locale(template: &str, locale: NumberLocale) -> Result<Self> {
        let mut engine = Engine::new();
        addons::configure(&mut engine, locale);
        // Compile the template early so we can fail-fast in construction.
        let template = engine.compile(template.to_string()).or_raise(|| ErrorKind::Template)?;
        Ok(Self { engine, template })
    }

    /// Renders one fragment. The fragment's `sort_key` is the lowercased
    /// *matched* display name — not the requested identifier — so document
    /// ordering follows what the catalog actually resolved.
    #[instrument(skip_all, fields(name = %resolved.requested.name))]
    pub fn render(&self, resolved: &ResolvedExtension) -> Result<Fragment> {
        let markdown = self
            .template
            .render(&self.engine, Self::parameters(resolved))
            .to_string()
            .or_raise(|| ErrorKind::Template)?;
        Ok(Fragment { sort_key: resolved.extension.display_name.to_lowercase(), markdown })
    }

    /// Builds the [`upon::Value`] map exposed to the template engine.
    ///
    /// Two conveniences are pre-shaped here rather than left to templates:
    /// `stats.install`/`stats.rating` are looked up by statistic *name* (list
    /// positions in gallery responses are not contractual), and every
    /// well-known asset key exists in `assets` — as none when the version has
    /// no such file — so conditional fallbacks never hit a missing path.
    fn parameters(resolved: &ResolvedExtension) -> upon::Value {
        let statistics: Vec<upon::Value> = resolved
            .extension
            .statistics
            .iter()
            .map(|stat| {
                upon::value! {
                    statistic_name: stat.statistic_name.as_str(),
                    value: stat.value,
                }
            })
            .collect();

        let mut assets: BTreeMap<String, upon::Value> = asset::WELL_KNOWN
            .iter()
            .map(|known| (normalize_asset_type(known), upon::Value::None))
            .collect();
        for (key, source) in resolved.assets.iter() {
            assets.insert(key.to_string(), upon::Value::String(source.to_string()));
        }

        let install = find_statistic(resolved, &["install"]);
        let rating = find_statistic(resolved, &["weightedRating", "averagerating"]);

        upon::value! {
            name: resolved.requested.name.as_str(),
            extension: upon::value! {
                display_name: resolved.extension.display_name.as_str(),
                extension_name: resolved.extension.extension_name.as_str(),
                short_description: resolved.extension.short_description.as_str(),
                publisher: upon::value! {
                    display_name: resolved.extension.publisher.display_name.as_str(),
                    publisher_name: resolved.extension.publisher.publisher_name.as_str(),
                },
                statistics: upon::Value::List(statistics),
            },
            version: upon::value! {
                version: resolved.version.version.as_str(),
            },
            assets: upon::Value::Map(assets),
            stats: upon::value! {
                install: install,
                rating: rating,
            },
        }
    }
}

/// First statistic matching any of `names` (checked in order,
/// case-insensitively), or `0.0` when the gallery returned none of them.
fn find_statistic(resolved: &ResolvedExtension, names: &[&str]) -> f64 {
    names
        .iter()
        .find_map(|name| {
            resolved
                .extension
                .statistics
                .iter()
                .find(|stat| stat.statistic_name.eq_ignore_ascii_case(name))
        })
        .map(|stat| stat.value)
        .unwrap_or(0.0)
}

/// Custom [`upon`] extensions for number formatting and presence checks.
mod addons {
    use crate::numbers::{NumberLocale, format_fixed, format_grouped};
    use std::fmt::Write;
    use upon::{Engine, Value, fmt as upon_fmt};

    /// Coerces a template value to a float the way the helpers expect:
    /// numbers pass through, strings are parsed.
    fn as_float(value: &Value) -> Option<f64> {
        match value {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// `true` only for values that would render as non-empty content.
    fn present(value: Value) -> bool {
        match value {
            Value::None => false,
            Value::Bool(b) => b,
            Value::String(s) => !s.is_empty(),
            Value::List(l) => !l.is_empty(),
            Value::Map(m) => !m.is_empty(),
            Value::Integer(_) | Value::Float(_) => true,
        }
    }

    /// Registers the `grouped` and `fixed` formatters and the `present`
    /// function on the given engine. Values the formatters cannot coerce to
    /// a float fall through to upon's default formatting.
    pub(crate) fn configure(engine: &mut Engine<'_>, locale: NumberLocale) {
        engine.add_formatter("grouped", move |f: &mut upon_fmt::Formatter<'_>, value: &Value| {
            match as_float(value) {
                Some(number) => write!(f, "{}", format_grouped(number, locale))?,
                None => upon_fmt::default(f, value)?,
            };
            Ok(())
        });
        engine.add_formatter("fixed", |f: &mut upon_fmt::Formatter<'_>, value: &Value| {
            match as_float(value) {
                Some(number) => write!(f, "{}", format_fixed(number))?,
                None => upon_fmt::default(f, value)?,
            };
            Ok(())
        });
        engine.add_function("present", present);
    }
}
