use crate::types::ThemeMode;

pub struct ThemeDefinition {
    pub css: &'static str,
}

pub fn theme_definition(mode: ThemeMode) -> ThemeDefinition {
    match mode {
        ThemeMode::Dark => ThemeDefinition { css: DARK_THEME },
        ThemeMode::Light => ThemeDefinition { css: LIGHT_THEME },
    }
}

const DARK_THEME: &str = r#"
:root {
    --color-bg-primary: #0b0b0d;
    --color-bg-secondary: #131317;
    --color-bg-overlay: rgba(0, 0, 0, 0.85);
    --color-text-primary: #f2f2f2;
    --color-text-muted: #9b9ba3;
    --color-border: #2c2c33;
    --color-surface-muted: #1b1b21;
    --color-input-border: #2c2c33;
    --color-input-bg: #101014;
    --color-accent: #5b8cff;
    --color-danger: #e5484d;
    --color-success: #30a46c;
    --color-warning: #e3a008;
    --color-tag-bg: #1b2540;
    --color-tag-text: #9db7ff;
}
body { background: var(--color-bg-primary); color: var(--color-text-primary); }
.header { background: var(--color-bg-primary); }
.btn:hover,
.btn-ghost:hover { background: var(--color-surface-muted); }
.input { background: var(--color-input-bg); color: var(--color-text-primary); border-color: var(--color-input-border); }
.input:focus { border-color: var(--color-accent); }
"#;

const LIGHT_THEME: &str = r#"
:root {
    --color-bg-primary: #ffffff;
    --color-bg-secondary: #f6f6f8;
    --color-bg-overlay: rgba(255, 255, 255, 0.92);
    --color-text-primary: #16161a;
    --color-text-muted: #5c5c66;
    --color-border: #d8d8de;
    --color-surface-muted: #ececf1;
    --color-input-border: #c6c6cf;
    --color-input-bg: #ffffff;
    --color-accent: #2f63d8;
    --color-danger: #ce2c31;
    --color-success: #218358;
    --color-warning: #9e6c00;
    --color-tag-bg: #e3ebff;
    --color-tag-text: #2a4d9b;
}
body { background: var(--color-bg-primary); color: var(--color-text-primary); }
.header { background: var(--color-bg-primary); }
.btn { color: var(--color-text-primary); }
.btn:hover,
.btn-ghost:hover { background: var(--color-surface-muted); }
.input { background: var(--color-input-bg); color: var(--color-text-primary); border-color: var(--color-input-border); }
.input:focus { border-color: var(--color-accent); }
"#;
