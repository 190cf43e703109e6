//! Email rendering.
//!
//! Both message kinds go through the same path: pick the kind's template
//! pair, fill it from the message, and wrap the result in an
//! [`OutgoingEmail`]. Templates ending in `.html` are auto-escaped, so
//! markup typed into the form reaches the inbox as text.

use crate::domain::EmailAddress;
use crate::error::RenderResult;
use crate::models::{Message, OutgoingEmail};
use minijinja::{context, Environment, Value};
use once_cell::sync::Lazy;

const NOT_SPECIFIED: &str = "Not specified";

static TEMPLATES: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.add_template("contact.html", include_str!("templates/contact.html"))
        .expect("Failed to compile contact.html template");
    env.add_template("contact.txt", include_str!("templates/contact.txt"))
        .expect("Failed to compile contact.txt template");
    env.add_template(
        "conversational.html",
        include_str!("templates/conversational.html"),
    )
    .expect("Failed to compile conversational.html template");
    env.add_template(
        "conversational.txt",
        include_str!("templates/conversational.txt"),
    )
    .expect("Failed to compile conversational.txt template");
    env
});

/// Build the template context for a message.
fn template_context(message: &Message) -> Value {
    let sent_on = message
        .submitted_at()
        .format("%B %-d, %Y at %H:%M UTC")
        .to_string();

    match message {
        Message::Contact(m) => context! {
            name => m.form.full_name(),
            greeting_name => m.form.first_name,
            email => m.form.email.as_str(),
            company => m.form.company.as_deref().unwrap_or(NOT_SPECIFIED),
            subject => m.form.subject,
            message => m.form.message,
            sent_on => sent_on,
        },
        Message::Conversational(m) => {
            let company = if m.form.company.is_empty() {
                NOT_SPECIFIED
            } else {
                m.form.company.as_str()
            };
            context! {
                name => m.form.name,
                greeting_name => m.form.name,
                email => m.form.email.as_str(),
                company => company,
                subject => m.form.subject,
                specifics => m.form.specifics,
                message => m.form.message,
                sent_on => sent_on,
            }
        }
    }
}

/// Render a message into the email sent to `recipient`.
///
/// # Errors
///
/// Returns `RenderError::Template` if a template fails to evaluate.
pub fn render_email(message: &Message, recipient: &EmailAddress) -> RenderResult<OutgoingEmail> {
    let kind = message.kind();
    let ctx = template_context(message);

    let html = TEMPLATES
        .get_template(&format!("{}.html", kind.as_str()))?
        .render(&ctx)?;
    let text = TEMPLATES
        .get_template(&format!("{}.txt", kind.as_str()))?
        .render(&ctx)?;

    Ok(OutgoingEmail {
        to: recipient.clone(),
        from: message.reply_to().clone(),
        subject: message.subject_line(),
        html,
        text,
        timestamp: message.submitted_at(),
        kind,
    })
}
