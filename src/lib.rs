#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod config;
pub mod document;
pub mod element;
pub mod error;
pub mod event;
pub mod geometry;
pub mod id_generator;
pub mod input;
pub mod layout;
pub mod page;
pub mod renderer;
pub mod selection;
pub mod state;
pub mod texture_manager;
pub mod tools;
pub mod view;

pub use app::SlideEditorApp;
pub use command::{Command, CommandError, CommandResult, UndoManager};
pub use config::EditorConfig;
pub use document::Deck;
pub use element::{Element, ElementProperty, ElementType};
pub use id_generator::{ElementId, PageId};
pub use input::{InputEvent, InputHandler};
pub use page::Page;
pub use state::EditorContext;
pub use view::ViewTransform;
