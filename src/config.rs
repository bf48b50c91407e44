use clap::Parser;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "prompt-gateway")]
#[command(about = "Caching gateway for a hosted LLM chat-completions API")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    // Upstream chat-completions endpoint
    #[arg(
        long,
        default_value = "https://router.huggingface.co/v1/chat/completions"
    )]
    pub api_url: String,

    // Model sent upstream when the request does not name one
    #[arg(short, long, default_value = "deepseek-ai/DeepSeek-R1:novita")]
    pub model: String,

    // Upstream request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub upstream_timeout: u64,

    // Cache TTL in seconds
    #[arg(short, long, default_value_t = 600)]
    pub cache_ttl: u64,

    // Rate limit max requests per window
    #[arg(long, default_value_t = 20)]
    pub rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, default_value_t = 60)]
    pub rate_window: u64,

    // Cleanup sweep interval in seconds (0 = lazy expiry only)
    #[arg(long, default_value_t = 0)]
    pub sweep_interval: u64,

    // Evict rate-limiter clients idle for this many seconds (sweep only)
    #[arg(long, default_value_t = 300)]
    pub idle_after: u64,
}
