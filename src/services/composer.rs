//! Outgoing message composition
//!
//! Pure construction of the tracked email parts: the pixel URL, the
//! tracked click-through URL, the HTML document embedding both, and the
//! plain-text fallback. No side effects.

/// URL the 1x1 tracking pixel is fetched from
pub fn pixel_url(base_url: &str, token: &str) -> String {
    format!("{}/track/{}", base_url.trim_end_matches('/'), token)
}

/// Tracked click-through URL carrying the percent-encoded destination
pub fn click_url(base_url: &str, token: &str, destination: &str) -> String {
    format!(
        "{}/click/{}?url={}",
        base_url.trim_end_matches('/'),
        token,
        urlencoding::encode(destination)
    )
}

/// Plain-text fallback for clients that refuse HTML
pub fn text_body() -> &'static str {
    "This is a fallback plain text message. Please view this email with an HTML-capable email client."
}

/// Full HTML body embedding the tracking pixel and the tracked CTA button
pub fn html_body(base_url: &str, token: &str, destination: &str, subject: &str) -> String {
    let pixel = pixel_url(base_url, token);
    let button_link = click_url(base_url, token, destination);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{subject}</title>
  <style>
    body {{
      font-family: Arial, sans-serif;
      line-height: 1.6;
      color: #333;
      margin: 0;
      padding: 0;
      background-color: #f4f4f4;
    }}
    .container {{
      max-width: 600px;
      margin: 20px auto;
      background-color: #ffffff;
      border-radius: 8px;
      overflow: hidden;
      box-shadow: 0 0 20px rgba(0, 0, 0, 0.1);
    }}
    .content {{
      padding: 30px;
    }}
    .cta-button {{
      display: inline-block;
      background-color: #2563eb;
      color: #ffffff;
      padding: 12px 24px;
      text-decoration: none;
      border-radius: 4px;
      font-weight: bold;
    }}
    .footer {{
      background-color: #f4f4f4;
      color: #666;
      text-align: center;
      padding: 10px;
      font-size: 12px;
    }}
  </style>
</head>
<body>
  <img src="{pixel}" width="1" height="1" alt="" style="display:none" />
  <div class="container">
    <div class="content">
      <h1>{subject}</h1>
      <p>Hello,</p>
      <p>Thank you for your interest. You can follow up using the button below:</p>
      <p style="text-align: center;">
        <a href="{button_link}" class="cta-button">View Details</a>
      </p>
      <p>Best regards,<br>The Team</p>
    </div>
    <div class="footer">
      <p>You received this email because you are on our mailing list.</p>
    </div>
  </div>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "2b0c9a4e-7a13-4a5f-9b2e-0d8f3c6a1e57";

    #[test]
    fn test_pixel_url() {
        assert_eq!(
            pixel_url("http://localhost:5001", TOKEN),
            format!("http://localhost:5001/track/{}", TOKEN)
        );
        // Trailing slash on the base must not double up
        assert_eq!(
            pixel_url("http://localhost:5001/", TOKEN),
            format!("http://localhost:5001/track/{}", TOKEN)
        );
    }

    #[test]
    fn test_click_url_encodes_destination() {
        let url = click_url(
            "http://localhost:5001",
            TOKEN,
            "https://www.example.com/portal?tab=status",
        );
        assert_eq!(
            url,
            format!(
                "http://localhost:5001/click/{}?url=https%3A%2F%2Fwww.example.com%2Fportal%3Ftab%3Dstatus",
                TOKEN
            )
        );
    }

    #[test]
    fn test_html_body_embeds_pixel_and_button() {
        let html = html_body(
            "http://localhost:5001",
            TOKEN,
            "https://www.example.com/portal",
            "Application Received",
        );

        assert!(html.contains(&pixel_url("http://localhost:5001", TOKEN)));
        assert!(html.contains(&click_url(
            "http://localhost:5001",
            TOKEN,
            "https://www.example.com/portal"
        )));
        assert!(html.contains("Application Received"));
        assert!(html.contains(r#"width="1" height="1""#));
    }
}
