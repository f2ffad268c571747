use std::collections::HashMap;

pub struct EmailTemplate {
    pub subject: &'static str,
    pub html: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

pub const CONTACT_ADMIN: EmailTemplate = EmailTemplate {
    subject: "New contact form message from {{name}}",
    html: r#"
        <div>
            <h1>New message from the website</h1>
            <p><strong>Name:</strong> {{name}}</p>
            <p><strong>Email:</strong> {{email}}</p>
            <p><strong>Message:</strong></p>
            <p>{{message}}</p>
        </div>
    "#,
    text: "New message from {{name}} <{{email}}>:\n\n{{message}}",
};

pub const BOOKING_ADMIN: EmailTemplate = EmailTemplate {
    subject: "New booking request: {{sessionType}}",
    html: r#"
        <div>
            <h1>New booking request</h1>
            <p><strong>Name:</strong> {{name}}</p>
            <p><strong>Email:</strong> {{email}}</p>
            <p><strong>Phone:</strong> {{phone}}</p>
            <p><strong>Session type:</strong> {{sessionType}}</p>
            <p><strong>Message:</strong> {{message}}</p>
        </div>
    "#,
    text: "New booking request from {{name}} <{{email}}>, {{phone}}.\nSession type: {{sessionType}}\n\n{{message}}",
};

pub const BOOKING_ACKNOWLEDGEMENT: EmailTemplate = EmailTemplate {
    subject: "We received your booking request",
    html: r#"
        <div>
            <h1>Thanks, {{name}}!</h1>
            <p>We received your request for a <strong>{{sessionType}}</strong> session and will get back to you shortly.</p>
        </div>
    "#,
    text: "Thanks, {{name}}! We received your request for a {{sessionType}} session and will get back to you shortly.",
};

pub const SUBSCRIBE_WELCOME: EmailTemplate = EmailTemplate {
    subject: "Welcome to our mailing list",
    html: r#"
        <div>
            <h1>Welcome!</h1>
            <p>You are now subscribed with {{email}}.</p>
            <p>Changed your mind? <a href="{{siteUrl}}/unsubscribe">Unsubscribe here</a>.</p>
        </div>
    "#,
    text: "Welcome! You are now subscribed with {{email}}.\nUnsubscribe at {{siteUrl}}/unsubscribe",
};

pub const WAIVER_CONFIRMATION: EmailTemplate = EmailTemplate {
    subject: "Your waiver for {{classTitle}}",
    html: r#"
        <div>
            <h1>See you soon, {{name}}!</h1>
            <p>We have your signed waiver for <strong>{{classTitle}}</strong> on {{date}}.</p>
        </div>
    "#,
    text: "See you soon, {{name}}! We have your signed waiver for {{classTitle}} on {{date}}.",
};

impl EmailTemplate {
    /// Fills every `{{key}}` placeholder. Unknown keys render as an empty string.
    ///
    /// Values are HTML-escaped in the html body only.
    pub fn render(&self, values: &HashMap<&str, &str>) -> RenderedEmail {
        RenderedEmail {
            subject: interpolate(self.subject, values, false),
            html: interpolate(self.html, values, true),
            text: interpolate(self.text, values, false),
        }
    }
}

fn interpolate(template: &str, values: &HashMap<&str, &str>, escape: bool) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        match after_open.find("}}") {
            Some(end) => {
                let value = values.get(after_open[..end].trim()).copied().unwrap_or("");

                if escape {
                    output.push_str(&escape_html(value));
                } else {
                    output.push_str(value);
                }
                rest = &after_open[end + 2..];
            }
            None => {
                output.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    output.push_str(rest);

    output
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for char in value.chars() {
        match char {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(char),
        }
    }

    escaped
}
