//! Built-in document shown when the requested source cannot be loaded.

/// Fallback Markdown document
pub const EMBEDDED_DOCUMENT: &str = r#"# Tic Tac Toe Web Application

A simple and responsive Tic Tac Toe game for two players, built with pure HTML, CSS (Tailwind CSS), and JavaScript. Play against a friend on the same screen!

## Features

*   **Two-Player Mode:** Play with a friend on the same device.
*   **Turn Indicator:** Clearly shows whose turn it is.
*   **Win/Draw Detection:** Automatically detects when a player wins or the game ends in a draw.
*   **Reset Option:** Easily start a new game at any time.
*   **Responsive Design:** Optimized for a seamless experience on both desktop and mobile devices using Tailwind CSS.

## Technologies Used

*   **HTML5:** For the structure of the web page.
*   **Tailwind CSS:** For modern and responsive styling.
*   **JavaScript (ES6+):** For all game logic and interactivity.

## How to Play

1.  Open `index.html` in your web browser.
2.  Player 'X' starts first.
3.  Players take turns clicking on an empty cell to place their 'X' or 'O'.
4.  The first player to get three of their marks in a row (horizontally, vertically, or diagonally) wins.
5.  If all cells are filled and no player has three in a row, the game is a draw.
6.  Click the "Reset Game" button to start a new game.

## Setup and Installation

This is a single-file web application, so no local server or build tools are required.

1.  **Download the files:** Obtain `index.html`, `README.md`, and `LICENSE` files.
2.  **Open `index.html`:** Simply open the `index.html` file directly in your preferred web browser.

## Project Structure

```
.
├── index.html     # The main game application file
├── README.md      # Project documentation
└── LICENSE        # MIT License details
```

## Contributing

Feel free to fork this repository, make improvements, and submit pull requests.

## License

This project is licensed under the MIT License - see the [LICENSE](LICENSE) file for details.
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_document_renders() {
        let html = mdlite::parse(EMBEDDED_DOCUMENT);
        assert!(html.starts_with("<h1>Tic Tac Toe Web Application</h1>"));
        assert!(html.contains("<h2>Features</h2><ul><li><strong>Two-Player Mode:</strong>"));
        assert!(html.contains("<pre><code>.\n├── index.html"));
        assert!(html.ends_with("</a> file for details.</p>"));
    }

    #[test]
    fn test_embedded_document_is_not_blank() {
        assert!(!EMBEDDED_DOCUMENT.trim().is_empty());
    }
}
