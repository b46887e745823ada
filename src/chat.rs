//! Mock chat: message list, typing flag, one scripted reply per message
//!
//! No model is called. Submitting text appends the user message, sets the
//! typing flag and arms a reply timer of its own. Each timer's event appends
//! one scripted answer; typing clears once no reply is outstanding.

use crate::events::{AppEvent, ChatChannel};
use crate::schedule::Timer;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::mpsc;

pub const SCRIPTED_REPLY: &str = "I've analyzed your recent activity. Based on your timeline, it \
seems you're heavily focused on AI architecture and React performance today. Would you like me \
to synthesize the key takeaways from the Gemini Tech Talk and the React Blog post?";

pub const SUGGESTIONS: [&str; 4] = [
    "Summarize today's timeline",
    "Analyze my browsing habits",
    "Draft a daily report",
    "Find connections in my reading",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

#[derive(Debug)]
pub struct ChatSession {
    channel: ChatChannel,
    reply_delay: Duration,
    messages: Vec<ChatMessage>,
    pub input: String,
    /// Outstanding replies in submission order, keyed by reply id
    pending: VecDeque<(u64, Timer)>,
    next_reply: u64,
}

impl ChatSession {
    pub fn new(channel: ChatChannel, reply_delay: Duration) -> Self {
        Self {
            channel,
            reply_delay,
            messages: Vec::new(),
            input: String::new(),
            pending: VecDeque::new(),
            next_reply: 0,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// True while at least one scripted reply is still due
    pub fn is_typing(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Submit the current input buffer
    ///
    /// Returns false and keeps the input when it is blank.
    pub fn submit(&mut self, tx: &mpsc::Sender<AppEvent>) -> bool {
        let text = std::mem::take(&mut self.input);
        if !self.send(&text, tx) {
            self.input = text;
            return false;
        }
        true
    }

    /// Append `text` as a user message and schedule its scripted reply
    pub fn send(&mut self, text: &str, tx: &mpsc::Sender<AppEvent>) -> bool {
        if text.trim().is_empty() {
            return false;
        }

        self.messages.push(ChatMessage {
            role: Role::User,
            text: text.to_string(),
        });

        self.next_reply += 1;
        let reply = self.next_reply;
        let channel = self.channel;
        let mut timer = Timer::new();
        timer.schedule(self.reply_delay, tx, |_| AppEvent::ChatReply { channel, reply });
        self.pending.push_back((reply, timer));
        tracing::debug!(?channel, reply, outstanding = self.pending.len(), "chat message submitted");
        true
    }

    /// Handle a delivered reply event; unknown or repeated ids are ignored
    pub fn on_reply(&mut self, reply: u64) -> bool {
        let Some(index) = self.pending.iter().position(|(id, _)| *id == reply) else {
            return false;
        };
        self.pending.remove(index);
        self.messages.push(ChatMessage {
            role: Role::Ai,
            text: SCRIPTED_REPLY.to_string(),
        });
        true
    }

    /// Replace the input with suggestion `index` (wraps)
    pub fn use_suggestion(&mut self, index: usize) {
        self.input = SUGGESTIONS[index % SUGGESTIONS.len()].to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    fn session() -> ChatSession {
        ChatSession::new(ChatChannel::View, Duration::from_millis(1500))
    }

    #[tokio::test(start_paused = true)]
    async fn whitespace_is_ignored() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut chat = session();
        chat.input = "   \t ".to_string();

        assert!(!chat.submit(&tx));
        assert!(chat.is_empty());
        assert!(!chat.is_typing());

        tokio::time::advance(Duration::from_secs(5)).await;
        settle().await;
        assert!(rx.try_recv().is_err(), "no reply timer may be armed");
    }

    #[tokio::test(start_paused = true)]
    async fn reply_arrives_after_delay() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut chat = session();
        chat.input = "test message".to_string();

        assert!(chat.submit(&tx));
        settle().await;
        assert!(chat.input.is_empty());
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].role, Role::User);
        assert!(chat.is_typing());

        tokio::time::advance(Duration::from_millis(1400)).await;
        settle().await;
        assert!(rx.try_recv().is_err());
        assert!(chat.is_typing());

        tokio::time::advance(Duration::from_millis(200)).await;
        settle().await;
        let event = rx.try_recv().expect("reply event");
        let AppEvent::ChatReply { channel, reply } = event else {
            panic!("unexpected event {event:?}");
        };
        assert_eq!(channel, ChatChannel::View);
        assert!(chat.on_reply(reply));

        assert_eq!(chat.messages().len(), 2);
        assert_eq!(chat.messages()[1].role, Role::Ai);
        assert_eq!(chat.messages()[1].text, SCRIPTED_REPLY);
        assert!(!chat.is_typing());

        // Same event delivered twice lands once
        assert!(!chat.on_reply(reply));
        assert_eq!(chat.messages().len(), 2);
    }

    fn replies(rx: &mut mpsc::Receiver<AppEvent>) -> Vec<u64> {
        let mut out = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let AppEvent::ChatReply { reply, .. } = event {
                out.push(reply);
            }
        }
        out
    }

    #[tokio::test(start_paused = true)]
    async fn second_message_while_typing_gets_its_own_reply() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut chat = session();

        assert!(chat.send("first", &tx));
        settle().await;
        tokio::time::advance(Duration::from_millis(500)).await;
        settle().await;
        assert!(chat.is_typing());
        assert!(chat.send("second", &tx));
        settle().await;

        // First reply lands at 1.5 s, the second is due at 2.0 s
        tokio::time::advance(Duration::from_millis(1100)).await;
        settle().await;
        let first = replies(&mut rx);
        assert_eq!(first.len(), 1);
        assert!(chat.on_reply(first[0]));
        assert!(chat.is_typing());

        tokio::time::advance(Duration::from_millis(500)).await;
        settle().await;
        let second = replies(&mut rx);
        assert_eq!(second.len(), 1);
        assert!(chat.on_reply(second[0]));
        assert!(!chat.is_typing());

        let users = chat.messages().iter().filter(|m| m.role == Role::User).count();
        let ais = chat.messages().iter().filter(|m| m.role == Role::Ai).count();
        assert_eq!((users, ais), (2, 2));

        tokio::time::advance(Duration::from_secs(5)).await;
        settle().await;
        assert!(replies(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_session_cancels_outstanding_replies() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut chat = session();
        chat.send("one", &tx);
        chat.send("two", &tx);
        settle().await;
        drop(chat);

        tokio::time::advance(Duration::from_secs(5)).await;
        settle().await;
        assert!(replies(&mut rx).is_empty());
    }

    #[test]
    fn suggestion_wraps() {
        let mut chat = session();
        chat.use_suggestion(5);
        assert_eq!(chat.input, SUGGESTIONS[1]);
    }
}
