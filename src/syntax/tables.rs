//! Classifier tables used to refine generic identifier runs.
//!
//! All lookups are exact, case-sensitive byte comparisons.

use super::lexeme::Category;

/// Language keywords.
pub const OPCODES: &[&str] = &[
    "void", "char", "bool", "short", "int", "long", "float", "double", "this", "typedef",
    "unsigned", "enum", "union", "sizeof", "return", "const", "static", "struct", "public",
    "private", "protected", "virtual", "new", "delete", "for", "while", "do", "true", "false",
    "if", "else", "continue", "break", "switch", "case", "default",
];

/// Well-known macros and constants.
pub const DEFINES: &[&str] = &[
    "NULL",
    "SEEK_END",
    "SEEK_CUR",
    "SEEK_SET",
    "COLOR_CLEAR",
    "VK_LEFT",
    "VK_RIGHT",
    "VK_UP",
    "VK_DOWN",
    "VK_BACK",
    "CALLBACK",
    "GetWindowLong",
    "SetWindowLong",
    "WIN32",
    "_DEBUG",
    "GWL_USERDATA",
    "GWL_WNDPROC",
    "LOWORD",
    "HIWORD",
    "GET_WHEEL_DELTA_WPARAM",
    "GET_X_LPARAM",
    "GET_Y_LPARAM",
    "WM_PAINT",
    "WM_SIZE",
    "WM_KEYDOWN",
    "WM_CHAR",
    "WM_MOUSEWHEEL",
    "WM_LBUTTONDOWN",
    "WM_LBUTTONUP",
    "WM_RBUTTONDOWN",
    "WM_RBUTTONUP",
    "WM_DESTROY",
    "DefWindowProc",
    "CreateWindow",
    "WS_OVERLAPPEDWINDOW",
    "SW_SHOWDEFAULT",
    "GetMessage",
    "DispatchMessage",
];

/// Preprocessor directives. `#` is an identifier byte, so these arrive as one run.
pub const DIRECTIVES: &[&str] = &[
    "#include", "#define", "#undef", "#if", "#ifdef", "#ifndef", "#else", "#endif",
];

/// Well-known type names.
pub const TYPES: &[&str] = &[
    "FILE",
    "BITMAPINFO",
    "BITMAPINFOHEADER",
    "MSG",
    "LONG",
    "Header",
    "RGBA",
    "Point",
    "Rect",
    "Color",
    "Font",
    "Canvas",
    "Editor",
    "Theme",
    "Syntax",
    "Lexeme",
    "Window",
    "HWND",
    "HDC",
    "LRESULT",
    "UINT",
    "WPARAM",
    "LPARAM",
];

/// Lookup order; the first table containing the word decides its category.
const PRECEDENCE: [(&[&str], Category); 4] = [
    (OPCODES, Category::Opcode),
    (DEFINES, Category::Define),
    (DIRECTIVES, Category::Argument),
    (TYPES, Category::Type),
];

/// Refine a generic Code run.
///
/// Returns the category of the first table that contains `word`, or
/// [`Category::Code`] when none does.
pub fn classify(word: &[u8]) -> Category {
    PRECEDENCE
        .iter()
        .find(|(table, _)| table.iter().any(|entry| entry.as_bytes() == word))
        .map_or(Category::Code, |&(_, category)| category)
}
