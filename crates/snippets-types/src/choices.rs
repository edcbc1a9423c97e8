/// Lexer names a snippet may declare as its `language`.
pub const LANGUAGES: &[&str] = &[
    "abap", "ada", "apl", "applescript", "arduino", "asm", "awk", "bash", "basic", "bat",
    "c", "clojure", "cmake", "cobol", "coffeescript", "common-lisp", "console", "cpp",
    "crystal", "csharp", "css", "cuda", "cython", "d", "dart", "diff", "django", "docker",
    "elixir", "elm", "erlang", "fortran", "fsharp", "gdscript", "glsl", "go", "graphql",
    "groovy", "haskell", "hcl", "html", "http", "idris", "ini", "java", "javascript",
    "jinja", "json", "jsx", "julia", "kotlin", "latex", "less", "lua", "make", "markdown",
    "matlab", "mysql", "nasm", "nginx", "nim", "nix", "objective-c", "ocaml", "pascal",
    "perl", "php", "postgresql", "powershell", "prolog", "protobuf", "pycon", "python",
    "python2", "r", "racket", "rb", "rst", "ruby", "rust", "sass", "scala", "scheme",
    "scss", "smalltalk", "solidity", "sql", "sqlite3", "swift", "tcl", "terraform", "tex",
    "text", "toml", "tsx", "typescript", "vb.net", "verilog", "vhdl", "vim", "vue", "wasm",
    "xml", "yaml", "zig",
];

/// Colour scheme names a snippet may declare as its `style`.
pub const STYLES: &[&str] = &[
    "abap", "algol", "algol_nu", "arduino", "autumn", "borland", "bw", "colorful",
    "default", "dracula", "emacs", "friendly", "friendly_grayscale", "fruity",
    "github-dark", "gruvbox-dark", "gruvbox-light", "igor", "inkpot", "lightbulb",
    "lilypond", "lovelace", "manni", "material", "monokai", "murphy", "native", "nord",
    "nord-darker", "one-dark", "paraiso-dark", "paraiso-light", "pastie", "perldoc",
    "rainbow_dash", "rrt", "sas", "solarized-dark", "solarized-light", "staroffice",
    "stata-dark", "stata-light", "tango", "trac", "vim", "vs", "xcode", "zenburn",
];

pub const DEFAULT_LANGUAGE: &str = "python";
pub const DEFAULT_STYLE: &str = "friendly";

pub fn is_language(value: &str) -> bool {
    LANGUAGES.contains(&value)
}

pub fn is_style(value: &str) -> bool {
    STYLES.contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_members() {
        assert!(is_language(DEFAULT_LANGUAGE));
        assert!(is_style(DEFAULT_STYLE));
    }

    #[test]
    fn choice_lists_are_sorted_without_duplicates() {
        for list in [LANGUAGES, STYLES] {
            let mut sorted = list.to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted, list);
        }
    }

    #[test]
    fn rejects_unknown_names() {
        assert!(!is_language("not-a-real-language"));
        assert!(!is_style("Friendly"));
    }
}
