//! Interactive menu loop driving a `RecordStore`.

pub mod input;
pub mod render;

pub use input::Prompter;
pub use render::{render_error, render_table};

use crate::domain::{EmployeeId, EmployeePatch, NewEmployee};
use crate::store::RecordStore;
use std::ops::ControlFlow;
use tokio::io::{self, AsyncBufRead, AsyncWrite};
use tracing::debug;

const MENU: &str = "\n===================================================\n\
1. Add Employee\n\
2. Get Employee by ID\n\
3. Get All Employees\n\
4. Update Employee\n\
5. Delete Employee\n\
6. Exit\n\
===================================================\n\n";

/// Last-name answer meaning the employee has none.
const NO_LAST_NAME: &str = "-";

/// Unwrap a prompt answer, ending the session when input is exhausted.
macro_rules! or_stop {
    ($answer:expr) => {
        match $answer {
            Some(value) => value,
            None => return Ok(ControlFlow::Break(())),
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    GetById,
    GetAll,
    Update,
    Delete,
    Exit,
}

impl MenuChoice {
    pub fn parse(token: &str) -> Option<Self> {
        match token.parse::<u32>().ok()? {
            1 => Some(MenuChoice::Add),
            2 => Some(MenuChoice::GetById),
            3 => Some(MenuChoice::GetAll),
            4 => Some(MenuChoice::Update),
            5 => Some(MenuChoice::Delete),
            6 => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

pub struct Shell<S, R, W> {
    store: S,
    io: Prompter<R, W>,
}

impl<S, R, W> Shell<S, R, W>
where
    S: RecordStore,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(store: S, reader: R, writer: W) -> Self {
        Self {
            store,
            io: Prompter::new(reader, writer),
        }
    }

    /// Hand back the store and the output sink once the session is over.
    pub fn into_parts(self) -> (S, W) {
        (self.store, self.io.into_writer())
    }

    /// Run the menu until Exit is chosen or input ends.
    ///
    /// Store failures are rendered and the loop continues; only I/O errors on
    /// the terminal itself are returned.
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            self.io.write(MENU).await?;
            let Some(token) = self.io.prompt("Enter your choice: ").await? else {
                break;
            };
            self.io.write("\n").await?;

            let choice = match MenuChoice::parse(&token) {
                Some(MenuChoice::Exit) => break,
                Some(choice) => choice,
                None => {
                    self.io.writeln("Invalid choice").await?;
                    continue;
                }
            };

            debug!(?choice, "Menu command");
            if self.dispatch(choice).await?.is_break() {
                break;
            }
        }
        Ok(())
    }

    async fn dispatch(&mut self, choice: MenuChoice) -> io::Result<ControlFlow<()>> {
        match choice {
            MenuChoice::Add => self.add().await,
            MenuChoice::GetById => self.get_by_id().await,
            MenuChoice::GetAll => self.get_all().await,
            MenuChoice::Update => self.update().await,
            MenuChoice::Delete => self.delete().await,
            MenuChoice::Exit => Ok(ControlFlow::Break(())),
        }
    }

    async fn add(&mut self) -> io::Result<ControlFlow<()>> {
        let first_name = or_stop!(self.io.prompt("Enter First Name: ").await?);
        let last_name = or_stop!(
            self.io
                .prompt("Enter Last Name (- for none): ")
                .await?
        );
        let department = or_stop!(self.io.prompt("Enter Department: ").await?);
        let salary = or_stop!(self.io.prompt_salary("Enter Salary: ").await?);

        let last_name = (last_name != NO_LAST_NAME).then_some(last_name);
        let employee = NewEmployee::new(first_name, last_name, department, salary);

        match self.store.create(&employee).await {
            Ok(id) => {
                self.io
                    .writeln(&format!("Employee added successfully with ID {}", id))
                    .await?
            }
            Err(e) => {
                debug!(error = %e, "Create failed");
                self.io.writeln("Failed to add employee").await?;
                self.io.writeln(&render_error(&e)).await?;
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    async fn get_by_id(&mut self) -> io::Result<ControlFlow<()>> {
        let id = or_stop!(self.prompt_id().await?);
        self.io.write("\n").await?;

        match self.store.get_by_id(id).await {
            Ok(employee) => self.io.write(&render_table(&[employee])).await?,
            Err(e) => self.io.writeln(&render_error(&e)).await?,
        }
        Ok(ControlFlow::Continue(()))
    }

    async fn get_all(&mut self) -> io::Result<ControlFlow<()>> {
        match self.store.get_all().await {
            Ok(employees) if employees.is_empty() => {
                self.io.writeln("No employees found").await?
            }
            Ok(employees) => self.io.write(&render_table(&employees)).await?,
            Err(e) => self.io.writeln(&render_error(&e)).await?,
        }
        Ok(ControlFlow::Continue(()))
    }

    async fn update(&mut self) -> io::Result<ControlFlow<()>> {
        let id = or_stop!(self.prompt_id().await?);
        let mut patch = EmployeePatch::default();

        if or_stop!(self.io.confirm("Do you want to update First Name? (Y/N): ").await?) {
            patch.first_name = Some(or_stop!(self.io.prompt("Enter First Name: ").await?));
        }
        if or_stop!(self.io.confirm("Do you want to update Last Name? (Y/N): ").await?) {
            let last_name = or_stop!(
                self.io
                    .prompt("Enter Last Name (- for none): ")
                    .await?
            );
            patch.last_name = Some((last_name != NO_LAST_NAME).then_some(last_name));
        }
        if or_stop!(self.io.confirm("Do you want to update Department? (Y/N): ").await?) {
            patch.department = Some(or_stop!(self.io.prompt("Enter Department: ").await?));
        }
        if or_stop!(self.io.confirm("Do you want to update Salary? (Y/N): ").await?) {
            patch.salary = Some(or_stop!(self.io.prompt_salary("Enter Salary: ").await?));
        }

        if patch.is_empty() {
            self.io
                .writeln("Invalid operation. Please update at least one field.")
                .await?;
            return Ok(ControlFlow::Continue(()));
        }

        match self.store.update(id, patch).await {
            Ok(()) => self.io.writeln("Employee updated successfully").await?,
            Err(e) => {
                debug!(id = %id, error = %e, "Update failed");
                self.io.writeln("Failed to update employee").await?;
                self.io.writeln(&render_error(&e)).await?;
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    async fn delete(&mut self) -> io::Result<ControlFlow<()>> {
        let id = or_stop!(self.prompt_id().await?);
        self.io.write("\n").await?;

        match self.store.delete(id).await {
            Ok(()) => self.io.writeln("Employee deleted successfully").await?,
            Err(e) => {
                debug!(id = %id, error = %e, "Delete failed");
                self.io.writeln("Failed to delete employee").await?;
                self.io.writeln(&render_error(&e)).await?;
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    async fn prompt_id(&mut self) -> io::Result<Option<EmployeeId>> {
        Ok(self
            .io
            .prompt_number::<i64>("Enter Employee ID: ")
            .await?
            .map(EmployeeId::new))
    }
}
