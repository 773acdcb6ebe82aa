/// UI text lookup
pub struct I18n;

impl I18n {
    pub fn new() -> Self {
        Self
    }

    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        match key {
            // Panels
            "panel.header" => "Quick Translate",
            "panel.from" => "From",
            "panel.to" => "To",
            "panel.source" => "Source",
            "panel.target" => "Translation",
            "panel.history" => "History",
            "panel.controls" => "Controls",
            "panel.help" => "Help",

            // Status messages
            "status.translating" => "Translating...",
            "status.done" => "Done",
            "status.failed" => "Translation failed",
            "status.same_language" => "Pick different languages",
            "status.auto_target" => "Pick a target language",
            "status.copied" => "Copied to clipboard",
            "status.clipboard_blocked" => "Clipboard blocked",
            "status.swapped" => "Languages swapped",
            "status.reused" => "Reused from history",
            "status.history_cleared" => "History cleared",
            "status.history_not_saved" => "Done, but history could not be saved",
            "status.history_not_cleared" => "History cleared, but the saved copy could not be removed",
            "status.theme" => "Theme:",

            // History
            "history.empty" => "No history yet.",

            // Target pane
            "target.placeholder" => "Translation appears here",
            "target.busy" => "Waiting for the translation service...",

            // Controls
            "controls.translate" => "translate",
            "controls.focus" => "focus",
            "controls.swap" => "swap",
            "controls.copy" => "copy",
            "controls.clear_history" => "clear history",
            "controls.theme" => "theme",
            "controls.help" => "help",
            "controls.quit" => "quit",

            // Help overlay
            "help.title" => "Keyboard Controls",
            "help.line1" => "Type or paste into the source pane (Backspace deletes, Ctrl+U clears)",
            "help.line2" => "Enter          translate the source text",
            "help.line3" => "Tab / Shift+Tab  move between source, languages and history",
            "help.line4" => "←/→ or ↑/↓     change the focused language",
            "help.line5" => "↑/↓ + Enter    pick a history entry and reuse it",
            "help.line6" => "Ctrl+S swap   Ctrl+Y copy   Ctrl+L clear history",
            "help.line7" => "Ctrl+T theme  F1 help       Esc / Ctrl+C quit",
            "help.about.title" => "About",
            "help.about.line1" => "Translations come from the MyMemory service.",
            "help.about.line2" => "Auto Detect lets the service guess the source language.",
            "help.about.line3" => "The last 10 translations are kept between sessions.",

            _ => key, // Fallback to key if not found
        }
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new()
    }
}
