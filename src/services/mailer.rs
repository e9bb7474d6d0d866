use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::Settings;
use crate::models::OrderDetails;

/// Fire-and-forget SMTP notifications. With no relay configured every send
/// is skipped and the checkout flow proceeds as if it had succeeded.
#[derive(Clone)]
pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
    admin_to: String,
}

impl Mailer {
    pub fn from_settings(settings: &Settings) -> Self {
        if settings.smtp_host.trim().is_empty() || settings.smtp_user.trim().is_empty() {
            return Self::disabled();
        }

        let relay = match AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.smtp_host)
        {
            Ok(relay) => relay,
            Err(e) => {
                tracing::warn!("SMTP relay unavailable, emails disabled: {e}");
                return Self::disabled();
            }
        };

        let transport = relay
            .port(settings.smtp_port)
            .credentials(Credentials::new(
                settings.smtp_user.clone(),
                settings.smtp_pass.clone(),
            ))
            .build();

        Self {
            transport: Some(transport),
            from: settings.smtp_from.clone(),
            admin_to: settings.admin_email.clone(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            transport: None,
            from: String::new(),
            admin_to: String::new(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.transport.is_some()
    }

    /// Confirmation mail to the buyer.
    pub async fn send_order_confirmation(
        &self,
        details: &OrderDetails,
        gateway_order_id: &str,
    ) -> Result<(), String> {
        let items: String = details
            .items
            .iter()
            .map(|item| format!("<li>{} - ₹{}</li>", item.title, item.price))
            .collect();

        let html = format!(
            r#"
            <h1>Thank you for your order!</h1>
            <p>Hi {name},</p>
            <p>We have received your payment of ₹{amount}.</p>
            <p>Order ID: {gateway_order_id}</p>
            <h3>Items:</h3>
            <ul>{items}</ul>
            <p>We will ship your items to:</p>
            <p>{address}</p>
            "#,
            name = details.customer_name,
            amount = details.amount,
            address = details.address,
        );

        self.send_html(&details.customer_email, "Order Confirmation - TechMarket", html)
            .await
    }

    /// Alert mail to the store owner, with a map link to the drop-off point.
    pub async fn send_admin_alert(
        &self,
        details: &OrderDetails,
        gateway_payment_id: &str,
    ) -> Result<(), String> {
        let gps_link = details
            .gps
            .map(|g| format!("https://www.google.com/maps?q={},{}", g.latitude, g.longitude))
            .unwrap_or_else(|| "Not provided".to_string());
        let coordinates = details
            .gps
            .map(|g| format!("{}, {}", g.latitude, g.longitude))
            .unwrap_or_else(|| "N/A".to_string());

        let items: String = details
            .items
            .iter()
            .map(|item| format!("<li>{} (Sold by: {})</li>", item.title, item.seller_name))
            .collect();

        let html = format!(
            r#"
            <h1>New Order Alert</h1>
            <p><strong>Customer:</strong> {name}</p>
            <p><strong>Email:</strong> {email}</p>
            <p><strong>Amount:</strong> ₹{amount}</p>
            <p><strong>Payment ID:</strong> {gateway_payment_id}</p>
            <p><strong>Address:</strong> {address}</p>
            <p><strong>GPS Location:</strong> <a href="{gps_link}">View on Map</a></p>
            <p><strong>Coordinates:</strong> {coordinates}</p>
            <h3>Items Sold:</h3>
            <ul>{items}</ul>
            "#,
            name = details.customer_name,
            email = details.customer_email,
            amount = details.amount,
            address = details.address,
        );

        self.send_html(&self.admin_to, "New Order Received!", html).await
    }

    async fn send_html(&self, to: &str, subject: &str, html: String) -> Result<(), String> {
        let Some(transport) = &self.transport else {
            return Ok(());
        };

        let email = Message::builder()
            .from(self.from.parse::<Mailbox>().map_err(|e| format!("invalid sender: {e}"))?)
            .to(to.parse::<Mailbox>().map_err(|e| format!("invalid recipient: {e}"))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html)
            .map_err(|e| e.to_string())?;

        transport.send(email).await.map_err(|e| e.to_string())?;
        Ok(())
    }
}
