//! Display names for well-known label names.

use std::collections::HashMap;

use once_cell::sync::Lazy;

static LABEL_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("bug", "🐛 Bug"),
        ("documentation", "📚 Docs"),
        ("enhancement", "✨ Enhancement"),
        ("help wanted", "🆘 Help wanted"),
        ("invalid", "❌ Invalid"),
        ("question", "❓ Question"),
        ("feature", "✨ Feature"),
        ("discussion", "💬 Discussion"),
        ("announcement", "📢 Announcement"),
        ("testing", "🧪 Testing"),
        ("test", "🧪 Testing"),
        ("urgent", "🔥 Urgent"),
        ("dependencies", "📦 Dependencies"),
        ("chore", "🧹 Chore"),
        ("refactor", "🔨 Refactor"),
        ("style", "🎨 Style"),
        ("fix", "🐛 Fix"),
        ("ci/cd", "🚀 CI/CD"),
        ("build", "👷 Build"),
        ("ui/ux", "🎨 UI/UX"),
        ("performance", "⚡ Performance"),
        ("security", "🔒 Security"),
        ("design", "🎨 Design"),
        ("backend", "⚙️ Backend"),
        ("frontend", "🖥️ Frontend"),
        ("database", "💾 Database"),
    ])
});

/// Display name for a label; unknown names pass through unchanged.
pub fn translate_label(name: &str) -> String {
    LABEL_NAMES
        .get(name.to_lowercase().as_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| name.to_string())
}
