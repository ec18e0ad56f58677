//! Token kinds of the Go lexical grammar.

/// The kind of a scanned token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    Unknown,
    EndOfFileToken,

    // Literals
    Identifier,
    IntLiteral,
    FloatLiteral,
    ImaginaryLiteral,
    RuneLiteral,
    StringLiteral,

    // Operators
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    PercentToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    AmpersandCaretToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    AmpersandCaretEqualsToken,
    AmpersandAmpersandToken,
    BarBarToken,
    LessThanMinusToken,
    PlusPlusToken,
    MinusMinusToken,
    EqualsEqualsToken,
    LessThanToken,
    GreaterThanToken,
    EqualsToken,
    ExclamationToken,
    TildeToken,
    ExclamationEqualsToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    ColonEqualsToken,
    DotDotDotToken,

    // Punctuation
    OpenParenToken,
    OpenBracketToken,
    OpenBraceToken,
    CommaToken,
    DotToken,
    CloseParenToken,
    CloseBracketToken,
    CloseBraceToken,
    SemicolonToken,
    ColonToken,

    // Keywords
    BreakKeyword,
    CaseKeyword,
    ChanKeyword,
    ConstKeyword,
    ContinueKeyword,
    DefaultKeyword,
    DeferKeyword,
    ElseKeyword,
    FallthroughKeyword,
    ForKeyword,
    FuncKeyword,
    GoKeyword,
    GotoKeyword,
    IfKeyword,
    ImportKeyword,
    InterfaceKeyword,
    MapKeyword,
    PackageKeyword,
    RangeKeyword,
    ReturnKeyword,
    SelectKeyword,
    StructKeyword,
    SwitchKeyword,
    TypeKeyword,
    VarKeyword,
}

impl SyntaxKind {
    /// Map an identifier-shaped word to its keyword kind.
    #[must_use]
    pub fn keyword(text: &str) -> Option<SyntaxKind> {
        let kind = match text {
            "break" => SyntaxKind::BreakKeyword,
            "case" => SyntaxKind::CaseKeyword,
            "chan" => SyntaxKind::ChanKeyword,
            "const" => SyntaxKind::ConstKeyword,
            "continue" => SyntaxKind::ContinueKeyword,
            "default" => SyntaxKind::DefaultKeyword,
            "defer" => SyntaxKind::DeferKeyword,
            "else" => SyntaxKind::ElseKeyword,
            "fallthrough" => SyntaxKind::FallthroughKeyword,
            "for" => SyntaxKind::ForKeyword,
            "func" => SyntaxKind::FuncKeyword,
            "go" => SyntaxKind::GoKeyword,
            "goto" => SyntaxKind::GotoKeyword,
            "if" => SyntaxKind::IfKeyword,
            "import" => SyntaxKind::ImportKeyword,
            "interface" => SyntaxKind::InterfaceKeyword,
            "map" => SyntaxKind::MapKeyword,
            "package" => SyntaxKind::PackageKeyword,
            "range" => SyntaxKind::RangeKeyword,
            "return" => SyntaxKind::ReturnKeyword,
            "select" => SyntaxKind::SelectKeyword,
            "struct" => SyntaxKind::StructKeyword,
            "switch" => SyntaxKind::SwitchKeyword,
            "type" => SyntaxKind::TypeKeyword,
            "var" => SyntaxKind::VarKeyword,
            _ => return None,
        };
        Some(kind)
    }

    #[must_use]
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            SyntaxKind::BreakKeyword
                | SyntaxKind::CaseKeyword
                | SyntaxKind::ChanKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::ContinueKeyword
                | SyntaxKind::DefaultKeyword
                | SyntaxKind::DeferKeyword
                | SyntaxKind::ElseKeyword
                | SyntaxKind::FallthroughKeyword
                | SyntaxKind::ForKeyword
                | SyntaxKind::FuncKeyword
                | SyntaxKind::GoKeyword
                | SyntaxKind::GotoKeyword
                | SyntaxKind::IfKeyword
                | SyntaxKind::ImportKeyword
                | SyntaxKind::InterfaceKeyword
                | SyntaxKind::MapKeyword
                | SyntaxKind::PackageKeyword
                | SyntaxKind::RangeKeyword
                | SyntaxKind::ReturnKeyword
                | SyntaxKind::SelectKeyword
                | SyntaxKind::StructKeyword
                | SyntaxKind::SwitchKeyword
                | SyntaxKind::TypeKeyword
                | SyntaxKind::VarKeyword
        )
    }

    #[must_use]
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            SyntaxKind::IntLiteral
                | SyntaxKind::FloatLiteral
                | SyntaxKind::ImaginaryLiteral
                | SyntaxKind::RuneLiteral
                | SyntaxKind::StringLiteral
        )
    }

    /// Binary operator precedence, 0 for tokens that are not binary operators.
    #[must_use]
    pub const fn binary_precedence(self) -> u8 {
        match self {
            SyntaxKind::BarBarToken => 1,
            SyntaxKind::AmpersandAmpersandToken => 2,
            SyntaxKind::EqualsEqualsToken
            | SyntaxKind::ExclamationEqualsToken
            | SyntaxKind::LessThanToken
            | SyntaxKind::LessThanEqualsToken
            | SyntaxKind::GreaterThanToken
            | SyntaxKind::GreaterThanEqualsToken => 3,
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::BarToken
            | SyntaxKind::CaretToken => 4,
            SyntaxKind::AsteriskToken
            | SyntaxKind::SlashToken
            | SyntaxKind::PercentToken
            | SyntaxKind::LessThanLessThanToken
            | SyntaxKind::GreaterThanGreaterThanToken
            | SyntaxKind::AmpersandToken
            | SyntaxKind::AmpersandCaretToken => 5,
            _ => 0,
        }
    }

    /// Assignment operators: `=` and the compound `op=` forms.
    #[must_use]
    pub const fn is_assignment(self) -> bool {
        matches!(
            self,
            SyntaxKind::EqualsToken
                | SyntaxKind::PlusEqualsToken
                | SyntaxKind::MinusEqualsToken
                | SyntaxKind::AsteriskEqualsToken
                | SyntaxKind::SlashEqualsToken
                | SyntaxKind::PercentEqualsToken
                | SyntaxKind::AmpersandEqualsToken
                | SyntaxKind::BarEqualsToken
                | SyntaxKind::CaretEqualsToken
                | SyntaxKind::LessThanLessThanEqualsToken
                | SyntaxKind::GreaterThanGreaterThanEqualsToken
                | SyntaxKind::AmpersandCaretEqualsToken
        )
    }

    /// Fixed source text of operators, punctuation and keywords.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            SyntaxKind::Unknown => "ILLEGAL",
            SyntaxKind::EndOfFileToken => "EOF",
            SyntaxKind::Identifier => "IDENT",
            SyntaxKind::IntLiteral => "INT",
            SyntaxKind::FloatLiteral => "FLOAT",
            SyntaxKind::ImaginaryLiteral => "IMAG",
            SyntaxKind::RuneLiteral => "CHAR",
            SyntaxKind::StringLiteral => "STRING",
            SyntaxKind::PlusToken => "+",
            SyntaxKind::MinusToken => "-",
            SyntaxKind::AsteriskToken => "*",
            SyntaxKind::SlashToken => "/",
            SyntaxKind::PercentToken => "%",
            SyntaxKind::AmpersandToken => "&",
            SyntaxKind::BarToken => "|",
            SyntaxKind::CaretToken => "^",
            SyntaxKind::LessThanLessThanToken => "<<",
            SyntaxKind::GreaterThanGreaterThanToken => ">>",
            SyntaxKind::AmpersandCaretToken => "&^",
            SyntaxKind::PlusEqualsToken => "+=",
            SyntaxKind::MinusEqualsToken => "-=",
            SyntaxKind::AsteriskEqualsToken => "*=",
            SyntaxKind::SlashEqualsToken => "/=",
            SyntaxKind::PercentEqualsToken => "%=",
            SyntaxKind::AmpersandEqualsToken => "&=",
            SyntaxKind::BarEqualsToken => "|=",
            SyntaxKind::CaretEqualsToken => "^=",
            SyntaxKind::LessThanLessThanEqualsToken => "<<=",
            SyntaxKind::GreaterThanGreaterThanEqualsToken => ">>=",
            SyntaxKind::AmpersandCaretEqualsToken => "&^=",
            SyntaxKind::AmpersandAmpersandToken => "&&",
            SyntaxKind::BarBarToken => "||",
            SyntaxKind::LessThanMinusToken => "<-",
            SyntaxKind::PlusPlusToken => "++",
            SyntaxKind::MinusMinusToken => "--",
            SyntaxKind::EqualsEqualsToken => "==",
            SyntaxKind::LessThanToken => "<",
            SyntaxKind::GreaterThanToken => ">",
            SyntaxKind::EqualsToken => "=",
            SyntaxKind::ExclamationToken => "!",
            SyntaxKind::TildeToken => "~",
            SyntaxKind::ExclamationEqualsToken => "!=",
            SyntaxKind::LessThanEqualsToken => "<=",
            SyntaxKind::GreaterThanEqualsToken => ">=",
            SyntaxKind::ColonEqualsToken => ":=",
            SyntaxKind::DotDotDotToken => "...",
            SyntaxKind::OpenParenToken => "(",
            SyntaxKind::OpenBracketToken => "[",
            SyntaxKind::OpenBraceToken => "{",
            SyntaxKind::CommaToken => ",",
            SyntaxKind::DotToken => ".",
            SyntaxKind::CloseParenToken => ")",
            SyntaxKind::CloseBracketToken => "]",
            SyntaxKind::CloseBraceToken => "}",
            SyntaxKind::SemicolonToken => ";",
            SyntaxKind::ColonToken => ":",
            SyntaxKind::BreakKeyword => "break",
            SyntaxKind::CaseKeyword => "case",
            SyntaxKind::ChanKeyword => "chan",
            SyntaxKind::ConstKeyword => "const",
            SyntaxKind::ContinueKeyword => "continue",
            SyntaxKind::DefaultKeyword => "default",
            SyntaxKind::DeferKeyword => "defer",
            SyntaxKind::ElseKeyword => "else",
            SyntaxKind::FallthroughKeyword => "fallthrough",
            SyntaxKind::ForKeyword => "for",
            SyntaxKind::FuncKeyword => "func",
            SyntaxKind::GoKeyword => "go",
            SyntaxKind::GotoKeyword => "goto",
            SyntaxKind::IfKeyword => "if",
            SyntaxKind::ImportKeyword => "import",
            SyntaxKind::InterfaceKeyword => "interface",
            SyntaxKind::MapKeyword => "map",
            SyntaxKind::PackageKeyword => "package",
            SyntaxKind::RangeKeyword => "range",
            SyntaxKind::ReturnKeyword => "return",
            SyntaxKind::SelectKeyword => "select",
            SyntaxKind::StructKeyword => "struct",
            SyntaxKind::SwitchKeyword => "switch",
            SyntaxKind::TypeKeyword => "type",
            SyntaxKind::VarKeyword => "var",
        }
    }
}
