//! HTML templates for the debug pages.

/// Escape HTML special characters to prevent XSS.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8" />
    <title>{title} - fedlens</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, sans-serif;
            max-width: 960px;
            margin: 40px auto;
            padding: 0 20px;
        }}
        .warning {{
            background: #fff3cd;
            border: 1px solid #ffc107;
            padding: 15px;
            border-radius: 8px;
            margin-bottom: 20px;
        }}
        .error {{
            background: #f8d7da;
            border: 1px solid #f5c2c7;
            padding: 15px;
            border-radius: 8px;
        }}
        pre {{
            background: #f8f9fa;
            padding: 15px;
            border-radius: 8px;
            overflow-x: auto;
        }}
        a.button {{
            display: inline-block;
            padding: 10px 16px;
            margin-right: 10px;
            background: #007bff;
            color: white;
            border-radius: 4px;
            text-decoration: none;
        }}
    </style>
</head>
<body>
{body}
</body>
</html>"#,
        title = html_escape(title),
    )
}

fn readiness(ready: bool) -> &'static str {
    if ready {
        "ready"
    } else {
        "not configured"
    }
}

/// Landing page with links to start each flow.
pub fn index_page(mock_mode: bool, oidc_ready: bool, saml_ready: bool) -> String {
    let banner = if mock_mode {
        r#"<div class="warning"><strong>Mock mode</strong>: flows return synthetic credentials, no IdP is contacted.</div>"#
    } else {
        ""
    };

    layout(
        "Home",
        &format!(
            r#"<h1>Federation debugger</h1>
{banner}
<p>OIDC: {oidc} &middot; SAML: {saml}</p>
<p>
    <a class="button" href="/oidc/login">Start OIDC login</a>
    <a class="button" href="/saml/login">Start SAML login</a>
</p>"#,
            oidc = readiness(mock_mode || oidc_ready),
            saml = readiness(mock_mode || saml_ready),
        ),
    )
}

/// Decoded ID token page.
pub fn oidc_results_page(raw_token: &str, header_json: &str, payload_json: &str) -> String {
    layout(
        "OIDC result",
        &format!(
            r#"<h1>OIDC ID token</h1>
<div class="warning">Decoded without signature verification. Do not use for trust decisions.</div>
<h2>Raw token</h2>
<pre>{raw_token}</pre>
<h2>Header</h2>
<pre>{header_json}</pre>
<h2>Payload</h2>
<pre>{payload_json}</pre>
<p><a href="/">Back</a></p>"#,
            raw_token = html_escape(raw_token),
            header_json = html_escape(header_json),
            payload_json = html_escape(payload_json),
        ),
    )
}

/// Parsed SAML Response page.
pub fn saml_results_page(parsed_json: &str, formatted_xml: &str, notes: &[String]) -> String {
    let notes: String = notes
        .iter()
        .map(|note| format!("<li>{}</li>", html_escape(note)))
        .collect();
    let notes = if notes.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="warning"><ul>{notes}</ul></div>"#)
    };

    layout(
        "SAML result",
        &format!(
            r#"<h1>SAML Response</h1>
{notes}
<h2>Parsed</h2>
<pre>{parsed_json}</pre>
<h2>XML</h2>
<pre>{formatted_xml}</pre>
<p><a href="/">Back</a></p>"#,
            parsed_json = html_escape(parsed_json),
            formatted_xml = html_escape(formatted_xml),
        ),
    )
}

pub fn error_page(message: &str) -> String {
    layout(
        "Error",
        &format!(
            r#"<h1>Something went wrong</h1>
<div class="error">{message}</div>
<p><a href="/">Back</a></p>"#,
            message = html_escape(message),
        ),
    )
}

/// Generate an auto-submitting form that POSTs a SAML Response to the ACS.
///
/// Mirrors the HTTP-POST binding an IdP uses after login.
pub fn saml_post_page(acs_url: &str, saml_response: &str, mock: bool) -> String {
    let mock_input = if mock {
        r#"<input type="hidden" name="mock" value="true" />"#
    } else {
        ""
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Redirecting...</title>
</head>
<body onload="document.forms[0].submit()">
    <form method="POST" action="{acs_url}">
        <input type="hidden" name="SAMLResponse" value="{saml_response}" />
        {mock_input}
        <noscript>
            <p>JavaScript is disabled. Click the button below to continue.</p>
            <button type="submit">Continue</button>
        </noscript>
    </form>
</body>
</html>"#,
        acs_url = html_escape(acs_url),
        saml_response = html_escape(saml_response),
    )
}
