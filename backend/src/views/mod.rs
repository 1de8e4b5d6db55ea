//! HTML pages
//!
//! Plain server-rendered pages. Every user-supplied or flashed string
//! passes through [`escape`] before it is interpolated.

use axum::response::Html;
use shared::{Advisory, DiseaseLabel};

/// The three input forms, with their routes and page titles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPage {
    Crop,
    Fertilizer,
    Disease,
}

impl FormPage {
    pub fn path(self) -> &'static str {
        match self {
            FormPage::Crop => "/crop-recommend",
            FormPage::Fertilizer => "/fertilizer",
            FormPage::Disease => "/disease",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            FormPage::Crop => "FarmIQ - Crop Recommendation",
            FormPage::Fertilizer => "FarmIQ - Fertilizer Suggestion",
            FormPage::Disease => "FarmIQ - Disease Detection",
        }
    }
}

/// Escape text for use in HTML element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{ font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; margin: 0; color: #1f2d1f; background: #f4f8f1; }}
        nav {{ background: #2e6b30; padding: 12px 24px; }}
        nav a {{ color: #fff; margin-right: 18px; text-decoration: none; }}
        main {{ max-width: 720px; margin: 32px auto; padding: 0 16px; }}
        label {{ display: block; margin-top: 12px; }}
        input, select {{ padding: 6px; width: 100%; box-sizing: border-box; }}
        button {{ margin-top: 18px; padding: 8px 20px; background: #2e6b30; color: #fff; border: 0; }}
        .flash {{ background: #fdecea; border: 1px solid #e0a39d; padding: 10px; }}
        .result {{ background: #fff; border: 1px solid #cfe0c8; padding: 16px; }}
    </style>
</head>
<body>
    <nav>
        <a href="/">FarmIQ</a>
        <a href="/crop-recommend">Crop</a>
        <a href="/fertilizer">Fertilizer</a>
        <a href="/disease">Disease</a>
    </nav>
    <main>
{body}
    </main>
</body>
</html>
"#,
        title = escape(title),
    ))
}

fn flash_block(flash: Option<&str>) -> String {
    flash
        .map(|message| format!(r#"<p class="flash">{}</p>"#, escape(message)))
        .unwrap_or_default()
}

fn advisory_block(advisory: &Advisory) -> String {
    let items: String = advisory
        .details
        .iter()
        .map(|item| format!("<li>{}</li>", escape(item)))
        .collect();
    if items.is_empty() {
        format!("<p>{}</p>", escape(advisory.headline))
    } else {
        format!(
            "<p><strong>{}</strong></p>\n<ul>{items}</ul>",
            escape(advisory.headline)
        )
    }
}

pub fn home_page() -> Html<String> {
    layout(
        "FarmIQ - Home",
        r#"<h1>FarmIQ</h1>
<p>Data-driven advice for your farm.</p>
<ul>
    <li><a href="/crop-recommend">Crop recommendation</a> from soil nutrients and local weather</li>
    <li><a href="/fertilizer">Fertilizer suggestion</a> for the crop you grow</li>
    <li><a href="/disease">Disease detection</a> from a photo of a leaf</li>
</ul>"#,
    )
}

pub fn crop_form(flash: Option<&str>) -> Html<String> {
    let body = format!(
        r#"<h1>Find the most suitable crop</h1>
{flash}
<form action="/crop-predict" method="post">
    <label>Nitrogen <input type="number" name="nitrogen" required></label>
    <label>Phosphorous <input type="number" name="phosphorous" required></label>
    <label>Potassium <input type="number" name="pottasium" required></label>
    <label>pH level <input type="number" step="0.01" name="ph" required></label>
    <label>Rainfall (mm) <input type="number" step="0.01" name="rainfall" required></label>
    <label>City <input type="text" name="city" required></label>
    <button type="submit">Predict</button>
</form>"#,
        flash = flash_block(flash),
    );
    layout(FormPage::Crop.title(), &body)
}

/// Fertilizer form; `crops` fills the crop selector in table order
pub fn fertilizer_form<'a>(flash: Option<&str>, crops: impl Iterator<Item = &'a str>) -> Html<String> {
    let options: String = crops
        .map(|crop| format!(r#"<option value="{0}">{0}</option>"#, escape(crop)))
        .collect();
    let body = format!(
        r#"<h1>Get informed advice on fertilizer</h1>
{flash}
<form action="/fertilizer-predict" method="post">
    <label>Nitrogen <input type="number" name="nitrogen" required></label>
    <label>Phosphorous <input type="number" name="phosphorous" required></label>
    <label>Potassium <input type="number" name="pottasium" required></label>
    <label>Crop you want to grow
        <select name="cropname" required>{options}</select>
    </label>
    <button type="submit">Predict</button>
</form>"#,
        flash = flash_block(flash),
    );
    layout(FormPage::Fertilizer.title(), &body)
}

pub fn disease_form(flash: Option<&str>) -> Html<String> {
    let body = format!(
        r#"<h1>Find out which disease has been caught by your plant</h1>
{flash}
<form action="/disease-predict" method="post" enctype="multipart/form-data">
    <label>Leaf image <input type="file" name="file" accept="image/*" required></label>
    <button type="submit">Predict</button>
</form>"#,
        flash = flash_block(flash),
    );
    layout(FormPage::Disease.title(), &body)
}

pub fn crop_result(prediction: &str) -> Html<String> {
    let body = format!(
        r#"<div class="result">
    <h2>You should grow <strong>{}</strong> in your farm</h2>
</div>"#,
        escape(prediction)
    );
    layout(FormPage::Crop.title(), &body)
}

pub fn fertilizer_result(summary: &str, advisory: &Advisory) -> Html<String> {
    let body = format!(
        r#"<div class="result">
    <p>{}</p>
    {}
</div>"#,
        escape(summary),
        advisory_block(advisory)
    );
    layout(FormPage::Fertilizer.title(), &body)
}

pub fn disease_result(label: DiseaseLabel, advisory: &Advisory) -> Html<String> {
    let body = format!(
        r#"<div class="result">
    <h2>Crop: {}</h2>
    <h3>Disease: {}</h3>
    {}
</div>"#,
        escape(label.crop()),
        escape(label.condition()),
        advisory_block(advisory)
    );
    layout(FormPage::Disease.title(), &body)
}

/// Shown when a model or table needed by `page` failed to load
pub fn unavailable_page(page: FormPage, what: &str) -> Html<String> {
    let body = format!(
        r#"<h1>Service unavailable</h1>
<p>The {} is not available right now. Please try again later.</p>
<p><a href="{}">Back</a></p>"#,
        escape(what),
        page.path()
    );
    layout(page.title(), &body)
}

pub fn error_page(page: FormPage) -> Html<String> {
    let body = format!(
        r#"<h1>Something went wrong</h1>
<p>An unexpected error occurred while processing your request.</p>
<p><a href="{}">Back</a></p>"#,
        page.path()
    );
    layout(page.title(), &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x")</script> & 'y'"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; &#x27;y&#x27;"
        );
        assert_eq!(escape("Pune"), "Pune");
    }

    #[test]
    fn test_flash_is_escaped() {
        let Html(page) = crop_form(Some("Could not fetch weather data for '<b>'."));
        assert!(page.contains("&lt;b&gt;"));
        assert!(!page.contains("<b>"));
    }

    #[test]
    fn test_titles() {
        assert!(home_page().0.contains("<title>FarmIQ - Home</title>"));
        let Html(page) = disease_form(None);
        assert!(page.contains("<title>FarmIQ - Disease Detection</title>"));
        assert!(!page.contains("class=\"flash\""));
    }

    #[test]
    fn test_fertilizer_form_lists_crops() {
        let Html(page) = fertilizer_form(None, ["rice", "maize"].into_iter());
        assert!(page.contains(r#"<option value="rice">rice</option>"#));
        assert!(page.contains(r#"<option value="maize">maize</option>"#));
    }

    #[test]
    fn test_disease_result_shows_crop_and_condition() {
        let label = DiseaseLabel::TomatoLateBlight;
        let Html(page) = disease_result(label, &shared::disease_remedy(label));
        assert!(page.contains("Crop: Tomato"));
        assert!(page.contains("Disease: Late blight"));
    }
}
