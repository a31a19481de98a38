use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use kanban_shared::{api::TaskFilter, Priority};
use kanban_store::{Board, KeyValueStore};

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Board,
    TaskDetail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Columns,
    Ideas,
}

/// What a submitted line of text is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputPurpose {
    NewTask { column: String },
    NewIdea,
    EditContent { task_id: String },
    AddSubtask { task_id: String },
    AddComment { task_id: String },
    AddTag { task_id: String },
    RemoveTag { task_id: String },
    AddDependency { task_id: String },
    RemoveDependency { task_id: String },
    AddColumn,
    RemoveColumn { column: String },
    Search,
}

impl InputPurpose {
    pub fn title(&self) -> &'static str {
        match self {
            Self::NewTask { .. } => " New task ",
            Self::NewIdea => " New idea ",
            Self::EditContent { .. } => " Edit task ",
            Self::AddSubtask { .. } => " Add subtask ",
            Self::AddComment { .. } => " Add comment ",
            Self::AddTag { .. } => " Add tag ",
            Self::RemoveTag { .. } => " Remove tag ",
            Self::AddDependency { .. } => " Depends on task id ",
            Self::RemoveDependency { .. } => " Remove dependency id ",
            Self::AddColumn => " Column name ",
            Self::RemoveColumn { .. } => " Column has tasks. Move them to which column? ",
            Self::Search => " Search ",
        }
    }
}

/// Destructive actions waiting for a yes/no answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteTask(String),
    DeleteIdea(String),
    BulkDelete(usize),
    ClearAll,
}

impl ConfirmAction {
    pub fn prompt(&self) -> String {
        match self {
            Self::DeleteTask(_) => "Are you sure you want to delete this task?".to_string(),
            Self::DeleteIdea(_) => "Delete this idea?".to_string(),
            Self::BulkDelete(count) => format!("Delete {} selected tasks?", count),
            Self::ClearAll => {
                "Delete all tasks and ideas? This cannot be undone.".to_string()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Popup {
    None,
    Input { purpose: InputPurpose, text: String },
    Confirm(ConfirmAction),
    Help,
}

pub struct App<S: KeyValueStore> {
    pub board: Board<S>,
    pub view: View,
    pub focus: Focus,
    pub popup: Popup,

    // Board navigation
    pub selected_column: usize,
    pub selected_task: usize,
    pub selected_idea: usize,

    // Task detail
    pub detail_task: Option<String>,
    pub selected_subtask: usize,

    pub status_message: Option<String>,
    pub error_message: Option<String>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(board: Board<S>) -> Self {
        Self {
            board,
            view: View::Board,
            focus: Focus::Columns,
            popup: Popup::None,
            selected_column: 0,
            selected_task: 0,
            selected_idea: 0,
            detail_task: None,
            selected_subtask: 0,
            status_message: None,
            error_message: None,
        }
    }

    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Turns a storage failure into an on-screen error.
    fn report<T>(&mut self, action: &str, result: kanban_store::Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("{} failed: {}", action, e);
                self.set_error(format!("{} failed: {}", action, e));
                None
            }
        }
    }

    // Selection helpers

    pub fn category(&self) -> String {
        self.board.current_category().to_string()
    }

    pub fn columns(&self) -> Vec<String> {
        self.board.columns_for(self.board.current_category()).to_vec()
    }

    pub fn selected_column_id(&self) -> Option<String> {
        self.columns().get(self.selected_column).cloned()
    }

    /// Ids of the visible tasks of a column, in display order.
    pub fn column_task_ids(&self, column: &str) -> Vec<String> {
        self.board
            .grouped_view()
            .column(self.board.current_category(), column)
            .iter()
            .map(|t| t.id.clone())
            .collect()
    }

    pub fn selected_task_id(&self) -> Option<String> {
        let column = self.selected_column_id()?;
        self.column_task_ids(&column).get(self.selected_task).cloned()
    }

    pub fn idea_ids(&self) -> Vec<String> {
        self.board
            .ideas_for(self.board.current_category())
            .iter()
            .map(|idea| idea.id.clone())
            .collect()
    }

    fn clamp_selection(&mut self) {
        let columns = self.columns();
        if self.selected_column >= columns.len() {
            self.selected_column = columns.len().saturating_sub(1);
        }
        let tasks = self
            .selected_column_id()
            .map(|c| self.column_task_ids(&c).len())
            .unwrap_or(0);
        if self.selected_task >= tasks {
            self.selected_task = tasks.saturating_sub(1);
        }
        let ideas = self.idea_ids().len();
        if self.selected_idea >= ideas {
            self.selected_idea = ideas.saturating_sub(1);
        }
    }

    fn open_input(&mut self, purpose: InputPurpose, text: &str) {
        self.popup = Popup::Input {
            purpose,
            text: text.to_string(),
        };
    }

    /// Handle key events, returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        // Clear error on any key press
        if self.error_message.is_some() {
            self.clear_error();
            return Ok(false);
        }

        // Global quit with Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(true);
        }

        match self.popup.clone() {
            Popup::Input { purpose, text } => {
                self.handle_input_key(key, purpose, text);
                return Ok(false);
            }
            Popup::Confirm(action) => {
                self.handle_confirm_key(key, action);
                return Ok(false);
            }
            Popup::Help => {
                self.popup = Popup::None;
                return Ok(false);
            }
            Popup::None => {}
        }

        let quit = match self.view {
            View::Board => self.handle_board_key(key),
            View::TaskDetail => {
                self.handle_detail_key(key);
                false
            }
        };
        self.clamp_selection();
        Ok(quit)
    }

    fn handle_input_key(&mut self, key: KeyEvent, purpose: InputPurpose, mut text: String) {
        match key.code {
            KeyCode::Esc => self.popup = Popup::None,
            KeyCode::Enter => {
                self.popup = Popup::None;
                self.submit_input(purpose, text);
            }
            KeyCode::Backspace => {
                text.pop();
                self.popup = Popup::Input { purpose, text };
            }
            KeyCode::Char(c) => {
                text.push(c);
                self.popup = Popup::Input { purpose, text };
            }
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent, action: ConfirmAction) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.popup = Popup::None;
                self.run_confirmed(action);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.popup = Popup::None;
            }
            _ => {}
        }
    }

    fn run_confirmed(&mut self, action: ConfirmAction) {
        match action {
            ConfirmAction::DeleteTask(task_id) => {
                let result = self.board.delete_task(&task_id);
                if self.report("Delete task", result) == Some(true) {
                    self.set_status("Task deleted");
                    if self.detail_task.as_deref() == Some(task_id.as_str()) {
                        self.close_detail();
                    }
                }
            }
            ConfirmAction::DeleteIdea(idea_id) => {
                let result = self.board.delete_idea(&idea_id);
                if self.report("Delete idea", result) == Some(true) {
                    self.set_status("Idea deleted");
                }
            }
            ConfirmAction::BulkDelete(_) => {
                let result = self.board.bulk_delete();
                if let Some(count) = self.report("Bulk delete", result) {
                    self.set_status(format!("Deleted {} tasks", count));
                }
            }
            ConfirmAction::ClearAll => {
                let result = self.board.clear_all();
                if self.report("Clear all", result).is_some() {
                    self.set_status("Board cleared");
                }
            }
        }
        self.clamp_selection();
    }

    fn submit_input(&mut self, purpose: InputPurpose, text: String) {
        let category = self.category();

        match purpose {
            InputPurpose::NewTask { column } => {
                let result = self.board.create_task(&category, &column);
                if let Some(Some(task_id)) = self.report("Create task", result) {
                    if !text.trim().is_empty() {
                        let result = self.board.edit_task_content(&task_id, &text);
                        self.report("Edit task", result);
                    }
                    self.select_task(&column, &task_id);
                    self.set_status(format!("Created {}", task_id));
                }
            }
            InputPurpose::NewIdea => {
                let result = self.board.create_idea(&text, &category);
                if let Some(Some(idea_id)) = self.report("Add idea", result) {
                    self.set_status(format!("Captured {}", idea_id));
                }
            }
            InputPurpose::EditContent { task_id } => {
                let result = self.board.edit_task_content(&task_id, &text);
                self.report("Edit task", result);
            }
            InputPurpose::AddSubtask { task_id } => {
                let result = self.board.add_subtask(&task_id, &text);
                self.report("Add subtask", result);
            }
            InputPurpose::AddComment { task_id } => {
                let result = self.board.add_comment(&task_id, &text);
                self.report("Add comment", result);
            }
            InputPurpose::AddTag { task_id } => {
                let result = self.board.add_tag(&task_id, &text);
                self.report("Add tag", result);
            }
            InputPurpose::RemoveTag { task_id } => {
                let result = self.board.remove_tag(&task_id, text.trim());
                self.report("Remove tag", result);
            }
            InputPurpose::AddDependency { task_id } => {
                let result = self.board.add_dependency(&task_id, text.trim());
                if self.report("Add dependency", result) == Some(false) {
                    self.set_status(format!("No task {} to depend on", text.trim()));
                }
            }
            InputPurpose::RemoveDependency { task_id } => {
                let result = self.board.remove_dependency(&task_id, text.trim());
                self.report("Remove dependency", result);
            }
            InputPurpose::AddColumn => {
                let result = self.board.add_column(&category, &text);
                if let Some(Some(column)) = self.report("Add column", result) {
                    self.set_status(format!("Added column {}", column));
                }
            }
            InputPurpose::RemoveColumn { column } => {
                let destination = text.trim();
                let destination = (!destination.is_empty()).then_some(destination);
                let result = self.board.remove_column(&category, &column, destination);
                if self.report("Remove column", result) == Some(true) {
                    self.set_status(format!("Removed column {}", column));
                }
            }
            InputPurpose::Search => {
                self.board.set_search(text.trim());
                self.selected_task = 0;
            }
        }
        self.clamp_selection();
    }

    fn handle_board_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') => self.popup = Popup::Help,
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Columns => Focus::Ideas,
                    Focus::Ideas => Focus::Columns,
                };
            }
            KeyCode::Char('h') | KeyCode::Left => self.move_left(),
            KeyCode::Char('l') | KeyCode::Right => self.move_right(),
            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),
            KeyCode::Char('i') => self.open_input(InputPurpose::NewIdea, ""),
            KeyCode::Char('n') => {
                if let Some(column) = self.selected_column_id() {
                    self.open_input(InputPurpose::NewTask { column }, "");
                }
            }
            KeyCode::Char('/') => {
                let search = self.board.filter().search.clone();
                self.open_input(InputPurpose::Search, &search);
            }
            KeyCode::Char('f') => self.cycle_priority_filter(),
            KeyCode::Char('g') => self.cycle_tag_filter(),
            KeyCode::Char('A') => {
                let showing = self.board.toggle_show_archived();
                self.selected_task = 0;
                self.set_status(if showing { "Showing archived" } else { "Showing active" });
            }
            KeyCode::Char('c') => self.cycle_category(),
            KeyCode::Char('t') => {
                let result = self.board.toggle_theme();
                self.report("Switch theme", result);
            }
            KeyCode::Char('+') => self.open_input(InputPurpose::AddColumn, ""),
            KeyCode::Char('-') => self.remove_selected_column(),
            KeyCode::Char('C') => self.popup = Popup::Confirm(ConfirmAction::ClearAll),
            KeyCode::Esc => self.board.clear_selection(),
            KeyCode::Char('X') => {
                let count = self.board.selection().len();
                if count > 0 {
                    self.popup = Popup::Confirm(ConfirmAction::BulkDelete(count));
                }
            }
            KeyCode::Char('M') if !self.board.selection().is_empty() => {
                if let Some(column) = self.selected_column_id() {
                    let result = self.board.bulk_move(&column);
                    if let Some(count) = self.report("Bulk move", result) {
                        self.set_status(format!("Moved {} tasks", count));
                    }
                }
            }
            KeyCode::Char('B') if !self.board.selection().is_empty() => {
                let result = self.board.bulk_archive();
                if let Some(count) = self.report("Bulk archive", result) {
                    self.set_status(format!("Archived {} tasks", count));
                }
            }
            _ => match self.focus {
                Focus::Columns => self.handle_task_key(key),
                Focus::Ideas => self.handle_idea_key(key),
            },
        }

        false
    }

    fn handle_task_key(&mut self, key: KeyEvent) {
        let Some(task_id) = self.selected_task_id() else {
            return;
        };

        match key.code {
            KeyCode::Enter => self.open_detail(task_id),
            KeyCode::Char('e') => {
                let content = self
                    .board
                    .task(&task_id)
                    .map(|t| t.content.clone())
                    .unwrap_or_default();
                self.open_input(InputPurpose::EditContent { task_id }, &content);
            }
            KeyCode::Char('d') => self.popup = Popup::Confirm(ConfirmAction::DeleteTask(task_id)),
            KeyCode::Char('a') => {
                let result = self.board.toggle_archive(&task_id);
                self.report("Archive task", result);
            }
            KeyCode::Char(' ') => {
                self.board.toggle_selection(&task_id);
            }
            KeyCode::Char('H') => self.shift_task(&task_id, -1),
            KeyCode::Char('L') => self.shift_task(&task_id, 1),
            KeyCode::Char('K') => self.reorder_up(&task_id),
            KeyCode::Char('J') => self.reorder_down(&task_id),
            KeyCode::Char(c @ '1'..='4') => {
                let priority = priority_for_digit(c);
                if self.board.selection().is_empty() {
                    let result = self.board.set_priority(&task_id, priority);
                    self.report("Set priority", result);
                } else {
                    let result = self.board.bulk_set_priority(priority);
                    if let Some(count) = self.report("Bulk priority", result) {
                        self.set_status(format!("Set {} tasks to {}", count, priority));
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_idea_key(&mut self, key: KeyEvent) {
        let Some(idea_id) = self.idea_ids().get(self.selected_idea).cloned() else {
            return;
        };

        match key.code {
            KeyCode::Char('p') | KeyCode::Enter => {
                let Some(column) = self.selected_column_id() else {
                    return;
                };
                let category = self.category();
                let result = self.board.promote_idea(&idea_id, &column, &category);
                if let Some(Some(task_id)) = self.report("Promote idea", result) {
                    self.select_task(&column, &task_id);
                    self.focus = Focus::Columns;
                    self.set_status(format!("Promoted to {}", task_id));
                }
            }
            KeyCode::Char('d') => self.popup = Popup::Confirm(ConfirmAction::DeleteIdea(idea_id)),
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        let Some(task_id) = self.detail_task.clone() else {
            self.close_detail();
            return;
        };
        let Some(task) = self.board.task(&task_id) else {
            self.close_detail();
            return;
        };
        let subtask_id = task.subtasks.get(self.selected_subtask).map(|s| s.id.clone());
        let last_comment = task.comments.last().map(|c| c.id.clone());
        let subtask_count = task.subtasks.len();
        let content = task.content.clone();

        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => self.close_detail(),
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected_subtask + 1 < subtask_count {
                    self.selected_subtask += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected_subtask = self.selected_subtask.saturating_sub(1);
            }
            KeyCode::Char('e') => {
                self.open_input(InputPurpose::EditContent { task_id }, &content)
            }
            KeyCode::Char('s') => self.open_input(InputPurpose::AddSubtask { task_id }, ""),
            KeyCode::Char('x') | KeyCode::Char(' ') => {
                if let Some(subtask_id) = subtask_id {
                    let result = self.board.toggle_subtask(&task_id, &subtask_id);
                    self.report("Toggle subtask", result);
                }
            }
            KeyCode::Char('D') => {
                if let Some(subtask_id) = subtask_id {
                    let result = self.board.delete_subtask(&task_id, &subtask_id);
                    self.report("Delete subtask", result);
                    self.selected_subtask = self.selected_subtask.saturating_sub(1);
                }
            }
            KeyCode::Char('m') => self.open_input(InputPurpose::AddComment { task_id }, ""),
            KeyCode::Char('M') => {
                if let Some(comment_id) = last_comment {
                    let result = self.board.delete_comment(&task_id, &comment_id);
                    self.report("Delete comment", result);
                }
            }
            KeyCode::Char('t') => self.open_input(InputPurpose::AddTag { task_id }, ""),
            KeyCode::Char('T') => self.open_input(InputPurpose::RemoveTag { task_id }, ""),
            KeyCode::Char('b') => self.open_input(InputPurpose::AddDependency { task_id }, ""),
            KeyCode::Char('B') => self.open_input(InputPurpose::RemoveDependency { task_id }, ""),
            KeyCode::Char('a') => {
                let result = self.board.toggle_archive(&task_id);
                self.report("Archive task", result);
            }
            KeyCode::Char(c @ '1'..='4') => {
                let result = self.board.set_priority(&task_id, priority_for_digit(c));
                self.report("Set priority", result);
            }
            KeyCode::Char('d') => self.popup = Popup::Confirm(ConfirmAction::DeleteTask(task_id)),
            _ => {}
        }
    }

    fn open_detail(&mut self, task_id: String) {
        self.detail_task = Some(task_id);
        self.selected_subtask = 0;
        self.view = View::TaskDetail;
    }

    fn close_detail(&mut self) {
        self.detail_task = None;
        self.view = View::Board;
    }

    fn select_task(&mut self, column: &str, task_id: &str) {
        if let Some(index) = self.columns().iter().position(|c| c == column) {
            self.selected_column = index;
        }
        if let Some(index) = self.column_task_ids(column).iter().position(|id| id == task_id) {
            self.selected_task = index;
        }
    }

    /// Moves a task one column left or right; it lands at the bottom.
    fn shift_task(&mut self, task_id: &str, step: isize) {
        let columns = self.columns();
        let target = self.selected_column as isize + step;
        if target < 0 || target as usize >= columns.len() {
            return;
        }
        let column = columns[target as usize].clone();
        let category = self.category();

        let result = self.board.move_task(task_id, &column, &category);
        if self.report("Move task", result) == Some(true) {
            self.select_task(&column, task_id);
        }
    }

    /// Drops the task on its upper neighbour.
    fn reorder_up(&mut self, task_id: &str) {
        let Some(column) = self.selected_column_id() else {
            return;
        };
        let ids = self.column_task_ids(&column);
        let Some(index) = ids.iter().position(|id| id == task_id) else {
            return;
        };
        if index == 0 {
            return;
        }

        let category = self.category();
        let result = self.board.reorder_task(task_id, &ids[index - 1], &column, &category);
        if self.report("Reorder task", result) == Some(true) {
            self.select_task(&column, task_id);
        }
    }

    /// Drops the task below its lower neighbour: before the one after it, or
    /// at the end of the column when there is none.
    fn reorder_down(&mut self, task_id: &str) {
        let Some(column) = self.selected_column_id() else {
            return;
        };
        let ids = self.column_task_ids(&column);
        let Some(index) = ids.iter().position(|id| id == task_id) else {
            return;
        };
        if index + 1 >= ids.len() {
            return;
        }

        let category = self.category();
        let result = match ids.get(index + 2) {
            Some(target) => self.board.reorder_task(task_id, target, &column, &category),
            None => self.board.move_task(task_id, &column, &category),
        };
        if self.report("Reorder task", result) == Some(true) {
            self.select_task(&column, task_id);
        }
    }

    fn remove_selected_column(&mut self) {
        let Some(column) = self.selected_column_id() else {
            return;
        };
        let category = self.category();
        let occupied = self
            .board
            .tasks()
            .values()
            .any(|t| t.column == column && t.category == category);

        if occupied {
            let fallback = self
                .columns()
                .into_iter()
                .find(|c| *c != column)
                .unwrap_or_default();
            self.open_input(InputPurpose::RemoveColumn { column }, &fallback);
        } else {
            let result = self.board.remove_column(&category, &column, None);
            if self.report("Remove column", result) == Some(true) {
                self.set_status(format!("Removed column {}", column));
            }
        }
    }

    fn cycle_category(&mut self) {
        let categories: Vec<String> = self.board.categories().map(String::from).collect();
        if categories.is_empty() {
            return;
        }
        let current = categories
            .iter()
            .position(|c| c == self.board.current_category())
            .unwrap_or(0);
        let next = categories[(current + 1) % categories.len()].clone();

        self.board.switch_category(&next);
        self.selected_column = 0;
        self.selected_task = 0;
        self.selected_idea = 0;
        // tag filter options are per category
        let filter = TaskFilter {
            tag: None,
            ..self.board.filter().clone()
        };
        self.board.set_filter(filter);
    }

    fn cycle_priority_filter(&mut self) {
        let current = self.board.filter().priority;
        let next = match current {
            None => Some(Priority::ALL[0]),
            Some(p) => Priority::ALL
                .iter()
                .position(|x| *x == p)
                .and_then(|i| Priority::ALL.get(i + 1).copied()),
        };
        let filter = TaskFilter {
            priority: next,
            ..self.board.filter().clone()
        };
        self.board.set_filter(filter);
        self.selected_task = 0;
    }

    fn cycle_tag_filter(&mut self) {
        let tags: Vec<String> = self
            .board
            .available_tags(self.board.current_category())
            .into_iter()
            .collect();
        let next = match self.board.filter().tag.as_ref() {
            None => tags.first().cloned(),
            Some(tag) => tags
                .iter()
                .position(|t| t == tag)
                .and_then(|i| tags.get(i + 1).cloned()),
        };
        let filter = TaskFilter {
            tag: next,
            ..self.board.filter().clone()
        };
        self.board.set_filter(filter);
        self.selected_task = 0;
    }

    pub fn move_left(&mut self) {
        if self.focus == Focus::Columns && self.selected_column > 0 {
            self.selected_column -= 1;
            self.selected_task = 0;
        }
    }

    pub fn move_right(&mut self) {
        let count = self.columns().len();
        if self.focus == Focus::Columns && count > 0 && self.selected_column < count - 1 {
            self.selected_column += 1;
            self.selected_task = 0;
        }
    }

    pub fn move_up(&mut self) {
        match self.focus {
            Focus::Columns => self.selected_task = self.selected_task.saturating_sub(1),
            Focus::Ideas => self.selected_idea = self.selected_idea.saturating_sub(1),
        }
    }

    pub fn move_down(&mut self) {
        match self.focus {
            Focus::Columns => {
                if let Some(column) = self.selected_column_id() {
                    if self.selected_task < self.column_task_ids(&column).len().saturating_sub(1) {
                        self.selected_task += 1;
                    }
                }
            }
            Focus::Ideas => {
                if self.selected_idea < self.idea_ids().len().saturating_sub(1) {
                    self.selected_idea += 1;
                }
            }
        }
    }
}

fn priority_for_digit(c: char) -> Priority {
    match c {
        '1' => Priority::Urgent,
        '2' => Priority::High,
        '3' => Priority::Medium,
        _ => Priority::Low,
    }
}
