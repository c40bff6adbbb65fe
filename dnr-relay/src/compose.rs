//! Email composition
//!
//! Builds the two emails sent per submission. Submission fields are embedded
//! as entered; the only transformation is turning line breaks in the
//! message into `<br>` so they survive HTML rendering.

use crate::relay::RelaySettings;
use crate::submission::ContactSubmission;
use crate::transport::OutboundEmail;

/// Subject of the customer confirmation
pub const CONFIRMATION_SUBJECT: &str = "Thank you for contacting DNR Transmissions";

const BRAND_RED: &str = "#b91c1c";
const PHONE_NUMBERS: &str = "011 396 2846 | 083 404 8326 | 063 535 5804";
const CONTACT_EMAIL: &str = "dini@dnrtransmissions.co.za";
const WORKSHOP_ADDRESS: &str = "Unit 7, 21 Sim Road, Pomona, Kempton Park, 1619";

/// Convert message line breaks to HTML line breaks
///
/// Handles `\r\n` as a single break.
pub fn message_to_html(message: &str) -> String {
    message.replace("\r\n", "\n").replace('\n', "<br>")
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

/// Lead notification for the business inbox
pub fn notification_email(settings: &RelaySettings, submission: &ContactSubmission) -> OutboundEmail {
    let row = |label: &str, value: &str| {
        format!(
            r#"<tr><td style="padding: 10px 0; border-bottom: 1px solid #333; font-weight: bold; width: 120px;">{}</td><td style="padding: 10px 0; border-bottom: 1px solid #333;">{}</td></tr>"#,
            label, value
        )
    };

    let email_link = format!(
        r#"<a href="mailto:{0}" style="color: {1};">{0}</a>"#,
        submission.email, BRAND_RED
    );
    let phone_link = format!(
        r#"<a href="tel:{}" style="color: {};">{}</a>"#,
        submission.phone,
        BRAND_RED,
        or_placeholder(&submission.phone, "Not provided")
    );

    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <div style="background: {red}; color: white; padding: 20px; text-align: center;">
    <h1 style="margin: 0;">New Contact Form Submission</h1>
  </div>
  <div style="padding: 30px; background: #1a1a1a; color: #e5e5e5;">
    <h2 style="color: {red}; margin-top: 0;">Customer Details</h2>
    <table style="width: 100%; border-collapse: collapse;">
      {name_row}
      {email_row}
      {phone_row}
      {vehicle_row}
    </table>
    <h2 style="color: {red}; margin-top: 30px;">Message</h2>
    <p style="background: #262626; padding: 15px; border-radius: 8px; line-height: 1.6;">{message}</p>
  </div>
  <div style="background: #262626; padding: 15px; text-align: center; color: #888; font-size: 12px;">
    <p>This email was sent from the DNR Transmissions website contact form.</p>
  </div>
</div>
"#,
        red = BRAND_RED,
        name_row = row("Name:", &submission.name),
        email_row = row("Email:", &email_link),
        phone_row = row("Phone:", &phone_link),
        vehicle_row = row(
            "Vehicle Type:",
            or_placeholder(&submission.vehicle_type, "Not specified")
        ),
        message = message_to_html(&submission.message),
    );

    OutboundEmail {
        from: settings.from_address.clone(),
        to: vec![settings.business_address.clone()],
        subject: format!("New Enquiry from {}", submission.name),
        html,
    }
}

/// Acknowledgement for the customer, echoing their message
pub fn confirmation_email(
    settings: &RelaySettings,
    submission: &ContactSubmission,
    year: i32,
) -> OutboundEmail {
    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <div style="background: {red}; color: white; padding: 20px; text-align: center;">
    <h1 style="margin: 0;">DNR Transmissions</h1>
  </div>
  <div style="padding: 30px; background: #f5f5f5; color: #333;">
    <h2 style="color: {red};">Thank you for your enquiry, {name}!</h2>
    <p>We have received your message and will get back to you as soon as possible.</p>
    <p>Our team typically responds within 24-48 hours during business days.</p>
    <hr style="border: none; border-top: 1px solid #ddd; margin: 20px 0;">
    <h3 style="color: {red};">Your Message:</h3>
    <p style="background: white; padding: 15px; border-radius: 8px; border-left: 4px solid {red};">{message}</p>
    <hr style="border: none; border-top: 1px solid #ddd; margin: 20px 0;">
    <h3 style="color: {red};">Contact Us:</h3>
    <p>
      📞 {phones}<br>
      📧 {contact}<br>
      📍 {address}
    </p>
  </div>
  <div style="background: #1a1a1a; padding: 15px; text-align: center; color: #888; font-size: 12px;">
    <p>© {year} DNR Transmissions. All rights reserved.</p>
  </div>
</div>
"#,
        red = BRAND_RED,
        name = submission.name,
        message = message_to_html(&submission.message),
        phones = PHONE_NUMBERS,
        contact = CONTACT_EMAIL,
        address = WORKSHOP_ADDRESS,
        year = year,
    );

    OutboundEmail {
        from: settings.from_address.clone(),
        to: vec![submission.email.clone()],
        subject: CONFIRMATION_SUBJECT.to_string(),
        html,
    }
}
