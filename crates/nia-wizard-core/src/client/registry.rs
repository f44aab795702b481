//! Client registry: the fixed, ordered catalogue of supported agents.
//!
//! Popular agents come first; the order is what users see in prompts and
//! what detection results follow.

use super::{
    McpClient, amazon_q::AmazonQClient, amp::AmpClient, antigravity::AntigravityClient,
    augment::AugmentClient, boltai::BoltAiClient, claude_code::ClaudeCodeClient,
    claude_desktop::ClaudeDesktopClient, cline::ClineClient, codex::CodexClient,
    continue_dev::ContinueClient, copilot::CopilotAgentClient, copilot::CopilotCliClient,
    crush::CrushClient, cursor::CursorClient, droid::DroidClient, gemini_cli::GeminiCliClient,
    jetbrains::JetBrainsClient, kilo_code::KiloCodeClient, kiro::KiroClient,
    lm_studio::LmStudioClient, opencode::OpenCodeClient, perplexity::PerplexityClient,
    qodo_gen::QodoGenClient, qwen_code::QwenCodeClient, roo_code::RooCodeClient,
    trae::TraeClient, vibe::VibeClient, visual_studio::VisualStudioClient, vscode::VsCodeClient,
    warp::WarpClient, windsurf::WindsurfClient, zed::ZedClient,
};

/// Registry of available clients.
#[derive(Debug)]
pub struct ClientRegistry {
    clients: Vec<Box<dyn McpClient>>,
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self::with_default_clients()
    }
}

impl ClientRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            clients: Vec::new(),
        }
    }

    /// Create a registry with every supported agent.
    pub fn with_default_clients() -> Self {
        let clients: Vec<Box<dyn McpClient>> = vec![
            Box::new(CursorClient::new()),
            Box::new(ClaudeCodeClient::new()),
            Box::new(ClaudeDesktopClient::new()),
            Box::new(VsCodeClient::new()),
            Box::new(WindsurfClient::new()),
            Box::new(ClineClient::new()),
            Box::new(ContinueClient::new()),
            Box::new(ZedClient::new()),
            Box::new(JetBrainsClient::new()),
            Box::new(AntigravityClient::new()),
            Box::new(TraeClient::new()),
            Box::new(RooCodeClient::new()),
            Box::new(KiloCodeClient::new()),
            Box::new(GeminiCliClient::new()),
            Box::new(OpenCodeClient::new()),
            Box::new(QodoGenClient::new()),
            Box::new(QwenCodeClient::new()),
            Box::new(VisualStudioClient::new()),
            Box::new(CrushClient::new()),
            Box::new(CopilotCliClient::new()),
            Box::new(CopilotAgentClient::new()),
            Box::new(AugmentClient::new()),
            Box::new(KiroClient::new()),
            Box::new(LmStudioClient::new()),
            Box::new(BoltAiClient::new()),
            Box::new(PerplexityClient::new()),
            Box::new(WarpClient::new()),
            Box::new(AmazonQClient::new()),
            Box::new(CodexClient::new()),
            Box::new(DroidClient::new()),
            Box::new(AmpClient::new()),
            Box::new(VibeClient::new()),
        ];
        Self { clients }
    }

    /// Register a client.
    pub fn register(&mut self, client: Box<dyn McpClient>) {
        self.clients.push(client);
    }

    /// Get all registered clients, in catalogue order.
    pub fn all(&self) -> &[Box<dyn McpClient>] {
        &self.clients
    }

    /// Get a client by ID.
    pub fn get(&self, id: &str) -> Option<&dyn McpClient> {
        self.clients
            .iter()
            .find(|c| c.id() == id)
            .map(|c| c.as_ref())
    }

    /// Look a client up by display name or ID, ignoring case.
    pub fn find(&self, key: &str) -> Option<&dyn McpClient> {
        let key = key.trim();
        self.clients
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(key) || c.id().eq_ignore_ascii_case(key))
            .map(|c| c.as_ref())
    }

    /// List all client IDs.
    pub fn client_ids(&self) -> Vec<&'static str> {
        self.clients.iter().map(|c| c.id()).collect()
    }

    /// List all display names.
    pub fn client_names(&self) -> Vec<&'static str> {
        self.clients.iter().map(|c| c.name()).collect()
    }
}
