pub struct Icons;

impl Icons {
    pub const CHECK: &str = "✓";
    pub const CROSS: &str = "✗";
    pub const WARN: &str = "⚠";
    pub const INFO: &str = "ℹ";
    pub const GRAD: &str = "🎓";
    pub const BOOKS: &str = "📚";
    pub const ADD: &str = "➕";
    pub const EDIT: &str = "✏️";
    pub const TRASH: &str = "🗑️";
    pub const GROUP: &str = "👥";
    pub const SEARCH: &str = "🔍";
    pub const MAG: &str = "🔎";
    pub const STATS: &str = "📊";
    pub const DOOR: &str = "🚪";
    pub const DATABASE: &str = "🗄️";
    pub const WRENCH: &str = "🔧";
    pub const MEMO: &str = "📝";
    pub const POINT: &str = "👉";
    pub const WAVE: &str = "👋";
}
