//! The built-in provider descriptor table — static for the process lifetime.
//!
//! Entries are near-identical metadata rows; behavior differences live in the
//! adapter parameters. Ids are unique across the whole table (asserted at
//! construction) and category membership is fixed.

use std::collections::HashMap;
use std::sync::Arc;

use switchboard_core::{Capability, ProviderCategory};

use crate::adapters::{Availability, HttpAdapter};
use crate::descriptor::ProviderDescriptor;

/// Ordered descriptor table with id lookup.
pub struct DescriptorTable {
    ordered: Vec<ProviderDescriptor>,
    index: HashMap<&'static str, usize>,
}

impl DescriptorTable {
    /// Build a table, enforcing the id-uniqueness invariant.
    ///
    /// # Panics
    /// Panics on a duplicate id — a duplicate is a programming error in the
    /// static table, not a runtime condition.
    pub fn new(descriptors: Vec<ProviderDescriptor>) -> Self {
        let mut index = HashMap::new();
        for (i, d) in descriptors.iter().enumerate() {
            if index.insert(d.id, i).is_some() {
                panic!("duplicate provider id '{}' in descriptor table", d.id);
            }
        }
        Self {
            ordered: descriptors,
            index,
        }
    }

    /// The built-in table of supported providers.
    pub fn builtin() -> Self {
        Self::new(builtin_descriptors())
    }

    /// Look up a descriptor by id.
    pub fn get(&self, id: &str) -> Option<&ProviderDescriptor> {
        self.index.get(id).map(|&i| &self.ordered[i])
    }

    /// All descriptors, in table order.
    pub fn iter(&self) -> impl Iterator<Item = &ProviderDescriptor> {
        self.ordered.iter()
    }

    /// Descriptors in `category`, in table order.
    pub fn by_category(&self, category: ProviderCategory) -> Vec<ProviderDescriptor> {
        self.ordered
            .iter()
            .filter(|d| d.category == category)
            .cloned()
            .collect()
    }

    /// Number of descriptors.
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

/// One table entry. `name_key`/`description_key` follow the fixed
/// `settings.providers.<id>.<field>` localization scheme.
fn entry(
    id: &'static str,
    category: ProviderCategory,
    name: &'static str,
    name_key: &'static str,
    description: &'static str,
    description_key: &'static str,
    capabilities: &'static [Capability],
    adapter: HttpAdapter,
) -> ProviderDescriptor {
    ProviderDescriptor {
        id,
        category,
        name,
        name_key,
        description,
        description_key,
        capabilities,
        adapter: Arc::new(adapter),
    }
}

/// Complete list of built-in provider descriptors.
pub fn builtin_descriptors() -> Vec<ProviderDescriptor> {
    use Capability::*;
    use ProviderCategory::*;

    vec![
        // ── Chat ──
        entry(
            "anthropic",
            Chat,
            "Anthropic",
            "settings.providers.anthropic.name",
            "Claude models via the Anthropic API",
            "settings.providers.anthropic.description",
            &[ListModels],
            HttpAdapter::cloud("https://api.anthropic.com/v1"),
        ),
        entry(
            "openai",
            Chat,
            "OpenAI",
            "settings.providers.openai.name",
            "GPT models via the OpenAI API",
            "settings.providers.openai.description",
            &[ListModels],
            HttpAdapter::cloud("https://api.openai.com/v1"),
        ),
        entry(
            "openrouter",
            Chat,
            "OpenRouter",
            "settings.providers.openrouter.name",
            "Unified gateway to many hosted models",
            "settings.providers.openrouter.description",
            &[ListModels],
            HttpAdapter::cloud("https://openrouter.ai/api/v1"),
        ),
        entry(
            "deepseek",
            Chat,
            "DeepSeek",
            "settings.providers.deepseek.name",
            "DeepSeek chat and reasoner models",
            "settings.providers.deepseek.description",
            &[ListModels],
            HttpAdapter::cloud("https://api.deepseek.com/v1"),
        ),
        entry(
            "groq",
            Chat,
            "Groq",
            "settings.providers.groq.name",
            "Fast open-weight models on Groq hardware",
            "settings.providers.groq.description",
            &[ListModels],
            HttpAdapter::cloud("https://api.groq.com/openai/v1"),
        ),
        entry(
            "gemini",
            Chat,
            "Gemini",
            "settings.providers.gemini.name",
            "Google Gemini models (OpenAI-compatible endpoint)",
            "settings.providers.gemini.description",
            &[ListModels],
            HttpAdapter::cloud("https://generativelanguage.googleapis.com/v1beta/openai"),
        ),
        entry(
            "mistral",
            Chat,
            "Mistral",
            "settings.providers.mistral.name",
            "Mistral and Codestral models",
            "settings.providers.mistral.description",
            &[ListModels],
            HttpAdapter::cloud("https://api.mistral.ai/v1"),
        ),
        entry(
            "moonshot",
            Chat,
            "Moonshot",
            "settings.providers.moonshot.name",
            "Kimi models via the Moonshot API",
            "settings.providers.moonshot.description",
            &[ListModels],
            HttpAdapter::cloud("https://api.moonshot.ai/v1"),
        ),
        entry(
            "minimax",
            Chat,
            "MiniMax",
            "settings.providers.minimax.name",
            "MiniMax chat models",
            "settings.providers.minimax.description",
            &[],
            HttpAdapter::cloud("https://api.minimax.io/v1"),
        ),
        entry(
            "dashscope",
            Chat,
            "DashScope",
            "settings.providers.dashscope.name",
            "Qwen models via Alibaba DashScope",
            "settings.providers.dashscope.description",
            &[ListModels],
            HttpAdapter::cloud("https://dashscope.aliyuncs.com/compatible-mode/v1"),
        ),
        entry(
            "zhipu",
            Chat,
            "ZhiPu",
            "settings.providers.zhipu.name",
            "GLM models via the ZhiPu open platform",
            "settings.providers.zhipu.description",
            &[],
            HttpAdapter::cloud("https://open.bigmodel.cn/api/paas/v4"),
        ),
        entry(
            "xai",
            Chat,
            "xAI",
            "settings.providers.xai.name",
            "Grok models via the xAI API",
            "settings.providers.xai.description",
            &[ListModels],
            HttpAdapter::cloud("https://api.x.ai/v1"),
        ),
        entry(
            "together",
            Chat,
            "Together AI",
            "settings.providers.together.name",
            "Open-weight models hosted by Together",
            "settings.providers.together.description",
            &[ListModels],
            HttpAdapter::cloud("https://api.together.xyz/v1"),
        ),
        entry(
            "fireworks",
            Chat,
            "Fireworks AI",
            "settings.providers.fireworks.name",
            "Open-weight models hosted by Fireworks",
            "settings.providers.fireworks.description",
            &[ListModels],
            HttpAdapter::cloud("https://api.fireworks.ai/inference/v1"),
        ),
        entry(
            "perplexity",
            Chat,
            "Perplexity",
            "settings.providers.perplexity.name",
            "Sonar online models via Perplexity",
            "settings.providers.perplexity.description",
            &[],
            HttpAdapter::cloud("https://api.perplexity.ai"),
        ),
        entry(
            "ollama",
            Chat,
            "Ollama",
            "settings.providers.ollama.name",
            "Local models served by Ollama",
            "settings.providers.ollama.description",
            &[ListModels, LoadModel],
            HttpAdapter::local("http://localhost:11434/v1").with_pull_path("/api/pull"),
        ),
        entry(
            "lmstudio",
            Chat,
            "LM Studio",
            "settings.providers.lmstudio.name",
            "Local models served by LM Studio",
            "settings.providers.lmstudio.description",
            &[ListModels],
            HttpAdapter::local("http://localhost:1234/v1"),
        ),
        entry(
            "vllm",
            Chat,
            "vLLM",
            "settings.providers.vllm.name",
            "Self-hosted models behind a vLLM server",
            "settings.providers.vllm.description",
            &[ListModels],
            HttpAdapter::local("http://localhost:8000/v1"),
        ),
        // ── Embedding ──
        entry(
            "voyage",
            Embedding,
            "Voyage AI",
            "settings.providers.voyage.name",
            "Voyage embedding models",
            "settings.providers.voyage.description",
            &[ListModels],
            HttpAdapter::cloud("https://api.voyageai.com/v1"),
        ),
        entry(
            "jina",
            Embedding,
            "Jina AI",
            "settings.providers.jina.name",
            "Jina embedding and reranker models",
            "settings.providers.jina.description",
            &[],
            HttpAdapter::cloud("https://api.jina.ai/v1"),
        ),
        entry(
            "mixedbread",
            Embedding,
            "Mixedbread",
            "settings.providers.mixedbread.name",
            "Mixedbread embedding models",
            "settings.providers.mixedbread.description",
            &[],
            HttpAdapter::cloud("https://api.mixedbread.ai/v1"),
        ),
        entry(
            "ollama-embed",
            Embedding,
            "Ollama Embeddings",
            "settings.providers.ollama-embed.name",
            "Local embedding models served by Ollama",
            "settings.providers.ollama-embed.description",
            &[ListModels, LoadModel],
            HttpAdapter::local("http://localhost:11434/v1").with_pull_path("/api/pull"),
        ),
        // ── Speech ──
        entry(
            "elevenlabs",
            Speech,
            "ElevenLabs",
            "settings.providers.elevenlabs.name",
            "Text-to-speech voices by ElevenLabs",
            "settings.providers.elevenlabs.description",
            &[ListVoices],
            HttpAdapter::cloud("https://api.elevenlabs.io/v1").with_voices_path("/voices"),
        ),
        entry(
            "openai-speech",
            Speech,
            "OpenAI Speech",
            "settings.providers.openai-speech.name",
            "OpenAI text-to-speech (fixed voice set)",
            "settings.providers.openai-speech.description",
            &[],
            HttpAdapter::cloud("https://api.openai.com/v1"),
        ),
        entry(
            "kokoro",
            Speech,
            "Kokoro",
            "settings.providers.kokoro.name",
            "Local Kokoro text-to-speech server",
            "settings.providers.kokoro.description",
            &[ListVoices],
            HttpAdapter::local("http://localhost:8880/v1").with_voices_path("/audio/voices"),
        ),
        // ── Transcription ──
        entry(
            "groq-whisper",
            Transcription,
            "Groq Whisper",
            "settings.providers.groq-whisper.name",
            "Whisper transcription on Groq hardware",
            "settings.providers.groq-whisper.description",
            &[],
            HttpAdapter::cloud("https://api.groq.com/openai/v1"),
        ),
        entry(
            "openai-whisper",
            Transcription,
            "OpenAI Whisper",
            "settings.providers.openai-whisper.name",
            "Whisper transcription via the OpenAI API",
            "settings.providers.openai-whisper.description",
            &[],
            HttpAdapter::cloud("https://api.openai.com/v1"),
        ),
        entry(
            "deepgram",
            Transcription,
            "Deepgram",
            "settings.providers.deepgram.name",
            "Deepgram streaming and batch transcription",
            "settings.providers.deepgram.description",
            &[],
            HttpAdapter::cloud("https://api.deepgram.com/v1"),
        ),
        entry(
            "whisper-cpp",
            Transcription,
            "Whisper.cpp",
            "settings.providers.whisper-cpp.name",
            "Local whisper.cpp server",
            "settings.providers.whisper-cpp.description",
            &[],
            HttpAdapter::local("http://localhost:8080/v1")
                .with_availability(Availability::Platforms(&["linux", "macos"])),
        ),
    ]
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
