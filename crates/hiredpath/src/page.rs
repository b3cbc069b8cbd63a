//! Static HTML rendering of the landing page.
//!
//! The document is inert: no script ships with it. Elements carry `data-*`
//! attributes (reveal threshold, parallax speed, tilt range, count-up target,
//! typewriter phrases) mirroring the `motion` crate's options, and the
//! `motion` subcommand simulates what they would do.
//!
//! The typewriter line under the headline is the only text not taken from
//! the product copy; its phrases come from `[effects.typewriter]`.

use anyhow::{Context, Result};
use siteconfig::{MotionSetting, SiteConfig};

use crate::content::{self, Feature, Stat};

/// Escapes text for element content and double-quoted attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn reveal_attrs(config: &SiteConfig) -> String {
    let effects = &config.effects;
    format!(
        r#"data-reveal data-reveal-threshold="{}" data-reveal-once="{}""#,
        effects.reveal.threshold, effects.reveal.once
    )
}

fn stat_item(stat: &Stat, config: &SiteConfig) -> String {
    let prefix = stat
        .prefix
        .map(|word| format!("{} ", escape_html(word)))
        .unwrap_or_default();
    format!(
        concat!(
            "      <li class=\"stat\" {reveal}>{prefix}",
            "<strong data-count-up=\"{value}\" data-count-up-duration=\"{duration}\">{value}</strong> ",
            "{text}</li>\n"
        ),
        reveal = reveal_attrs(config),
        prefix = prefix,
        value = escape_html(stat.value),
        duration = config.effects.count_up.duration.as_millis(),
        text = escape_html(stat.text),
    )
}

fn feature_card(feature: &Feature, config: &SiteConfig) -> String {
    format!(
        concat!(
            "      <article class=\"card\" {reveal} data-tilt data-tilt-max=\"{tilt}\">\n",
            "        <h3>{title}</h3>\n",
            "        <p>{description}</p>\n",
            "      </article>\n"
        ),
        reveal = reveal_attrs(config),
        tilt = config.effects.tilt_max_degrees,
        title = escape_html(feature.title),
        description = escape_html(feature.description),
    )
}

/// Renders the full document for `config`, stamping `year` into the footer.
pub fn render_page(config: &SiteConfig, year: i32) -> Result<String> {
    let effects = &config.effects;
    let typewriter = &effects.typewriter;
    let phrases =
        serde_json::to_string(&typewriter.phrases).context("failed to encode typewriter phrases")?;
    let first_phrase = typewriter
        .phrases
        .iter()
        .find(|phrase| !phrase.trim().is_empty())
        .map(String::as_str)
        .unwrap_or_default();
    let motion = match config.hero.motion {
        MotionSetting::NoPreference => "no-preference",
        MotionSetting::Reduce => "reduce",
    };
    let scroll = &config.scroll;

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("  <meta charset=\"utf-8\">\n");
    html.push_str(
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
    );
    html.push_str(&format!("  <title>{}</title>\n", escape_html(&config.page.title)));
    html.push_str("</head>\n");
    html.push_str(&format!(
        concat!(
            "<body data-motion=\"{motion}\" data-scroll-lerp=\"{lerp}\" ",
            "data-scroll-wheel-multiplier=\"{wheel}\" data-scroll-smooth-wheel=\"{smooth_wheel}\" ",
            "data-scroll-smooth-touch=\"{smooth_touch}\">\n"
        ),
        motion = motion,
        lerp = scroll.lerp,
        wheel = scroll.wheel_multiplier,
        smooth_wheel = scroll.smooth_wheel,
        smooth_touch = scroll.smooth_touch,
    ));

    html.push_str("  <header class=\"hero\">\n");
    html.push_str("    <div id=\"hero-canvas\" class=\"hero-canvas\" aria-hidden=\"true\"></div>\n");
    html.push_str(&format!(
        "    <div class=\"hero-copy\" data-parallax data-parallax-speed=\"{}\">\n",
        effects.parallax_speed
    ));
    html.push_str(&format!("      <h1>{}</h1>\n", escape_html(content::HERO_TITLE)));
    html.push_str(&format!(
        concat!(
            "      <p class=\"hero-role\"><span data-typewriter=\"{phrases}\" ",
            "data-type-interval=\"{type_ms}\" data-delete-interval=\"{delete_ms}\" ",
            "data-hold=\"{hold_ms}\" data-pause=\"{pause_ms}\">{first}</span></p>\n"
        ),
        phrases = escape_html(&phrases),
        type_ms = typewriter.type_interval.as_millis(),
        delete_ms = typewriter.delete_interval.as_millis(),
        hold_ms = typewriter.hold.as_millis(),
        pause_ms = typewriter.pause.as_millis(),
        first = escape_html(first_phrase),
    ));
    html.push_str(&format!(
        "      <p class=\"hero-subtitle\">{}</p>\n",
        escape_html(content::HERO_SUBTITLE)
    ));
    html.push_str(&format!(
        "      <a class=\"button\" href=\"#{}\">{}</a>\n",
        content::WAITLIST_ANCHOR,
        escape_html(content::HERO_CTA)
    ));
    html.push_str("    </div>\n  </header>\n");

    html.push_str("  <main>\n");
    html.push_str("    <section class=\"problem\">\n");
    html.push_str(&format!(
        "      <h2 {}>{}</h2>\n",
        reveal_attrs(config),
        escape_html(content::PROBLEM_HEADING)
    ));
    html.push_str("      <ul class=\"stats\">\n");
    for stat in &content::STATS {
        html.push_str(&stat_item(stat, config));
    }
    html.push_str("      </ul>\n    </section>\n");

    html.push_str("    <section class=\"features\">\n");
    for feature in &content::FEATURES {
        html.push_str(&feature_card(feature, config));
    }
    html.push_str("    </section>\n");

    html.push_str(&format!(
        "    <section id=\"{}\" class=\"cta\" {}>\n",
        content::WAITLIST_ANCHOR,
        reveal_attrs(config)
    ));
    html.push_str(&format!("      <h2>{}</h2>\n", escape_html(content::CTA_HEADING)));
    html.push_str(&format!(
        "      <a class=\"button\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>\n",
        escape_html(config.page.waitlist_url.trim()),
        escape_html(content::CTA_LINK)
    ));
    html.push_str("    </section>\n  </main>\n");

    html.push_str(&format!(
        "  <footer>\n    <p>{}</p>\n  </footer>\n",
        escape_html(&content::footer_text(year))
    ));
    html.push_str("</body>\n</html>\n");
    Ok(html)
}
