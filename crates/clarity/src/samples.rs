//! Built-in demo data for `simulate` and `emails`

use clarity_core::{Notification, RawMessage, SourceType};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// A canned notification with a precomputed urgency
#[derive(Debug, Clone, Copy)]
pub struct SampleNotification {
    pub source_type: SourceType,
    pub sender: &'static str,
    pub content: &'static str,
    pub urgency: f64,
}

/// A canned inbox message; its urgency comes from the scorer
#[derive(Debug, Clone, Copy)]
pub struct SampleEmail {
    pub sender: &'static str,
    pub sender_address: &'static str,
    pub subject: &'static str,
    pub snippet: &'static str,
    pub is_unread: bool,
    pub is_important: bool,
}

const fn notification(
    source_type: SourceType,
    sender: &'static str,
    content: &'static str,
    urgency: f64,
) -> SampleNotification {
    SampleNotification {
        source_type,
        sender,
        content,
        urgency,
    }
}

const fn email(
    sender: &'static str,
    sender_address: &'static str,
    subject: &'static str,
    snippet: &'static str,
    is_unread: bool,
    is_important: bool,
) -> SampleEmail {
    SampleEmail {
        sender,
        sender_address,
        subject,
        snippet,
        is_unread,
        is_important,
    }
}

pub const SAMPLE_NOTIFICATIONS: [SampleNotification; 10] = [
    notification(SourceType::Email, "CEO", "Urgent: Q4 review meeting moved", 0.95),
    notification(SourceType::Chat, "DevOps", "Production alert: high CPU", 0.9),
    notification(SourceType::Email, "Marketing", "Weekly newsletter draft ready", 0.3),
    notification(SourceType::Social, "LinkedIn", "Someone viewed your profile", 0.2),
    notification(SourceType::App, "Amazon", "Package delivered", 0.4),
    notification(SourceType::Chat, "Design Team", "Feedback on wireframes", 0.5),
    notification(SourceType::Email, "Client", "Re: Project timeline update", 0.75),
    notification(SourceType::Calendar, "Calendar", "Meeting in 15 minutes", 0.85),
    notification(SourceType::Email, "Newsletter", "Your daily tech digest", 0.15),
    notification(SourceType::App, "Banking", "Subscription payment successful", 0.25),
];

pub const SAMPLE_EMAILS: [SampleEmail; 15] = [
    email(
        "Sarah Chen (CEO)",
        "sarah@company.com",
        "URGENT: Board meeting moved to 2pm today",
        "Hi team, due to a scheduling conflict, we need to move the board meeting...",
        true,
        true,
    ),
    email(
        "DevOps Alert",
        "alerts@monitoring.com",
        "Production: High CPU usage detected",
        "Alert triggered at 14:32 - Server load at 89%. Immediate action required...",
        true,
        true,
    ),
    email(
        "LinkedIn",
        "noreply@linkedin.com",
        "Your weekly profile views",
        "47 people viewed your profile this week. See who's interested in your experience...",
        false,
        false,
    ),
    email(
        "Amazon",
        "shipment@amazon.com",
        "Your package has been delivered",
        "Good news! Your order #123-4567890 has been delivered to your doorstep...",
        true,
        false,
    ),
    email(
        "Marketing Team",
        "marketing@company.com",
        "Q1 Campaign Performance Report",
        "Attached is the Q1 marketing campaign analysis. Overall performance exceeded targets...",
        false,
        false,
    ),
    email(
        "Client: John Davis",
        "john.davis@client.com",
        "Re: Project timeline update",
        "Thanks for the update. Can we schedule a call to discuss the deliverables?...",
        true,
        false,
    ),
    email(
        "Google Calendar",
        "calendar@google.com",
        "Event reminder: Design review in 15 minutes",
        "Your event \"Design Review - Q1 Roadmap\" starts at 3:00 PM...",
        true,
        true,
    ),
    email(
        "Tech Newsletter",
        "newsletter@techcrunch.com",
        "Today's top tech stories",
        "AI breakthrough, startup funding news, and the latest in tech policy...",
        false,
        false,
    ),
    email(
        "HR Department",
        "hr@company.com",
        "Benefits enrollment deadline: Jan 31",
        "Reminder: Open enrollment for health benefits closes at end of month...",
        true,
        false,
    ),
    email(
        "GitHub",
        "noreply@github.com",
        "Pull request merged: Feature/user-auth",
        "Your pull request #234 was merged into main by @teammate...",
        false,
        false,
    ),
    email(
        "Slack",
        "feedback@slack.com",
        "[Design Team] 5 new messages",
        "@you were mentioned in #design-team. @Alex: \"Can you review the mockups?\"...",
        true,
        false,
    ),
    email(
        "Security Alert",
        "security@company.com",
        "New login from unknown device",
        "We detected a login to your account from a new device in San Francisco...",
        true,
        true,
    ),
    email(
        "Substack",
        "noreply@substack.com",
        "New post: The future of remote work",
        "Your favorite author just published: \"Why hybrid work is here to stay\"...",
        false,
        false,
    ),
    email(
        "Finance Team",
        "finance@company.com",
        "Expense report approved",
        "Your expense report #ER-2024-001 has been approved. Reimbursement processed...",
        true,
        false,
    ),
    email(
        "Twitter",
        "notify@twitter.com",
        "Someone liked your tweet",
        "@influencer and 12 others liked your tweet about AI trends...",
        false,
        false,
    ),
];

impl SampleNotification {
    pub fn to_notification(&self, id: impl Into<String>) -> Notification {
        Notification::new(id, self.source_type, self.sender, self.content)
            .with_urgency(self.urgency)
    }
}

impl SampleEmail {
    pub fn to_raw(&self) -> RawMessage {
        RawMessage {
            id: None,
            sender: self.sender.to_string(),
            sender_address: self.sender_address.to_string(),
            from: None,
            subject: self.subject.to_string(),
            snippet: self.snippet.to_string(),
            is_unread: self.is_unread,
            is_important: self.is_important,
        }
    }
}

/// Seeded when a seed is given, otherwise from the OS
pub fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Up to `count` distinct items in random order
fn pick<T: Copy>(items: &[T], count: usize, rng: &mut StdRng) -> Vec<(usize, T)> {
    let mut indexed: Vec<(usize, T)> = items.iter().copied().enumerate().collect();
    indexed.shuffle(rng);
    indexed.truncate(count);
    indexed
}

pub fn notification_batch(count: usize, rng: &mut StdRng) -> Vec<Notification> {
    pick(&SAMPLE_NOTIFICATIONS, count, rng)
        .into_iter()
        .map(|(i, sample)| sample.to_notification(format!("sample-{}", i + 1)))
        .collect()
}

pub fn email_batch(count: usize, rng: &mut StdRng) -> Vec<Notification> {
    pick(&SAMPLE_EMAILS, count, rng)
        .into_iter()
        .map(|(i, sample)| sample.to_raw().into_notification(|| format!("email-{}", i + 1)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clarity_core::scorer;
    use std::collections::HashSet;

    #[test]
    fn test_batch_size_is_capped() {
        let mut rng = rng(Some(1));
        assert_eq!(notification_batch(5, &mut rng).len(), 5);
        assert_eq!(notification_batch(50, &mut rng).len(), SAMPLE_NOTIFICATIONS.len());
        assert_eq!(email_batch(50, &mut rng).len(), SAMPLE_EMAILS.len());
    }

    #[test]
    fn test_batch_ids_are_unique() {
        let batch = email_batch(10, &mut rng(Some(7)));
        let ids: HashSet<_> = batch.iter().map(|n| n.id.clone()).collect();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn test_seed_is_reproducible() {
        let first: Vec<_> = notification_batch(5, &mut rng(Some(42)))
            .into_iter()
            .map(|n| n.id)
            .collect();
        let second: Vec<_> = notification_batch(5, &mut rng(Some(42)))
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_emails_are_scored_not_preset() {
        for n in email_batch(15, &mut rng(Some(3))) {
            assert_eq!(n.source_type, SourceType::Email);
            assert_eq!(n.raw_urgency, None);
            let score = scorer::score_notification(&n);
            assert!((0.0..=1.0).contains(&score));
        }
    }

    #[test]
    fn test_ceo_email_scores_full() {
        let ceo = SAMPLE_EMAILS[0].to_raw().into_notification(|| "x".to_string());
        assert_eq!(scorer::score_notification(&ceo), 1.0);
    }
}
