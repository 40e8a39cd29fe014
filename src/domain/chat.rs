//! Canned chat replies shared by the messaging webhook and the chat endpoint.

use serde::{Deserialize, Serialize};

const GREETINGS: [&str; 4] = ["hello", "hi", "start", "help"];

const WELCOME_TEXT: &str = "\u{1F3DB}\u{FE0F} Welcome to JollyLLBot - Legal Document Analysis Assistant!

I can help you analyze legal documents. Here's what I can do:

\u{1F4C4} Document Analysis
\u{1F4CB} Key Points Extraction  
\u{26A0}\u{FE0F} Risk Assessment
\u{1F4A1} Legal Recommendations

To get started:
1. Visit our web app to upload documents
2. Type 'analyze' for document analysis instructions
3. Type 'help' for more options

How can I assist you today?";

const DOCUMENT_INSTRUCTIONS_TEXT: &str = "\u{1F4C4} Document Analysis Instructions:

Currently, document upload is available through our web interface. 

\u{1F310} Web App Features:
\u{2022} Upload PDF, DOCX, or TXT files
\u{2022} Get instant AI-powered analysis
\u{2022} Receive detailed legal insights
\u{2022} Download analysis reports

\u{1F4F1} Coming Soon:
\u{2022} Direct document upload via WhatsApp
\u{2022} Voice message analysis
\u{2022} Quick legal Q&A

Visit our web app or type 'help' for more options.";

const STATUS_TEXT: &str = "\u{1F916} JollyLLBot Status:

\u{2705} WhatsApp Bot: Active
\u{2705} Document Analysis: Available
\u{2705} Web Interface: Online
\u{2699}\u{FE0F} AI Engine: Ready

\u{1F4CA} Capabilities:
\u{2022} PDF/DOCX/TXT Analysis
\u{2022} Legal Risk Assessment
\u{2022} Contract Review
\u{2022} Document Summarization

Type 'help' for assistance or visit our web app!";

const FALLBACK_TEXT: &str = "\u{1F914} I didn't quite understand that.

Try these commands:
\u{2022} 'hello' - Get started
\u{2022} 'analyze' - Document analysis info
\u{2022} 'help' - Show available options  
\u{2022} 'status' - Check system status

Or visit our web app for document upload and analysis!";

/// The four fixed replies the chat surfaces can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatReply {
    Welcome,
    DocumentInstructions,
    Status,
    Fallback,
}

impl ChatReply {
    /// Pick the reply for an incoming message. Matching ignores case and
    /// surrounding whitespace; the first matching rule wins.
    pub fn for_message(message: &str) -> Self {
        let normalized = message.trim().to_lowercase();

        if GREETINGS.contains(&normalized.as_str()) {
            Self::Welcome
        } else if normalized.contains("analyze") || normalized.contains("document") {
            Self::DocumentInstructions
        } else if normalized.contains("status") {
            Self::Status
        } else {
            Self::Fallback
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Self::Welcome => WELCOME_TEXT,
            Self::DocumentInstructions => DOCUMENT_INSTRUCTIONS_TEXT,
            Self::Status => STATUS_TEXT,
            Self::Fallback => FALLBACK_TEXT,
        }
    }
}

/// Request for `POST /api/chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// Response for `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Form fields posted by the messaging provider's webhook.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundMessage {
    #[serde(rename = "From", default)]
    pub from: String,
    #[serde(rename = "Body", default)]
    pub body: String,
}
