//! Error types shared by the whole library, generated with `error_chain!`.

use error_chain::*;

error_chain! {
    errors {
        /// The requested maze shape cannot exist: zero-sized dimensions or
        /// an entrance/exit outside the grid.
        InvalidConfiguration(reason: String) {
            description("invalid maze configuration")
            display("invalid maze configuration: {}", reason)
        }
        /// A wall operation was asked of two cells that are not grid
        /// neighbours. Correct carving logic never triggers this.
        InvalidOperation(reason: String) {
            description("invalid wall operation")
            display("invalid wall operation: {}", reason)
        }
        /// The solver's frontier emptied before the exit was found. A fully
        /// carved maze spans the grid, so this means the maze handed to the
        /// solver was structurally broken.
        Unreachable {
            description("exit unreachable from entrance")
            display("exit unreachable from entrance")
        }
    }
}
