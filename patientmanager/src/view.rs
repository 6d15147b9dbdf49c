use crate::console::{Console, Prompt};
use crate::controller::{LoginController, PatientController};
use crate::hash::password_hash;
use crate::AppError;
use flatbit::{Discharge, Patient, User};
use std::io::{BufRead, Write};
use std::ops::RangeInclusive;

const ID_RANGE: RangeInclusive<i64> = 1..=u32::MAX as i64;
const AGE_RANGE: RangeInclusive<i64> = 0..=150;
const RETURN_PROMPT: &str = "Press Enter to return to the main menu!";

pub struct LoginView<'c, 'r, R, W> {
    console: &'c mut Console<R, W>,
    controller: LoginController<'r>,
}

impl<'c, 'r, R: BufRead, W: Write> LoginView<'c, 'r, R, W> {
    pub fn new(console: &'c mut Console<R, W>, controller: LoginController<'r>) -> Self {
        Self { console, controller }
    }

    /// True once a username and password pair matched a stored account.
    pub fn render(&mut self) -> Result<bool, AppError> {
        self.console.print_title("Login")?;
        for _ in 0..self.console.max_attempts() {
            let Some(username) = self.console.read_line("Username: ")? else {
                return Ok(false);
            };
            let Some(password) = self.console.read_line("Password: ")? else {
                return Ok(false);
            };
            if self.controller.login(&User::new(username, password_hash(&password)))? {
                return Ok(true);
            }
            self.console.println("The entered username or password is incorrect!")?;
            self.console.println("")?;
        }
        self.console.println("Too many failed login attempts.")?;
        Ok(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreatePatient,
    SearchPatientById,
    SearchPatientsByName,
    DeletePatient,
    DischargePatient,
    EditIcd,
    PrintPatients,
    CreateUser,
    DeleteUser,
    Exit,
}

impl Action {
    pub const ALL: [Action; 10] = [
        Action::CreatePatient,
        Action::SearchPatientById,
        Action::SearchPatientsByName,
        Action::DeletePatient,
        Action::DischargePatient,
        Action::EditIcd,
        Action::PrintPatients,
        Action::CreateUser,
        Action::DeleteUser,
        Action::Exit,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            Action::CreatePatient => "create a patient",
            Action::SearchPatientById => "find a patient by id",
            Action::SearchPatientsByName => "find patients by last name",
            Action::DeletePatient => "delete a patient",
            Action::DischargePatient => "discharge a patient",
            Action::EditIcd => "add a diagnosis to a patient",
            Action::PrintPatients => "print all patients",
            Action::CreateUser => "add a user",
            Action::DeleteUser => "delete a user",
            Action::Exit => "exit the program",
        }
    }

    /// Menu numbers start at 1.
    pub fn from_number(number: i64) -> Option<Action> {
        usize::try_from(number).ok().and_then(|n| n.checked_sub(1)).and_then(|i| Self::ALL.get(i).copied())
    }
}

pub struct PatientView<'c, 'r, R, W> {
    console: &'c mut Console<R, W>,
    controller: PatientController<'r>,
}

impl<'c, 'r, R: BufRead, W: Write> PatientView<'c, 'r, R, W> {
    pub fn new(console: &'c mut Console<R, W>, controller: PatientController<'r>) -> Self {
        Self { console, controller }
    }

    /// Runs the main menu until the operator exits or input ends. Both paths persist.
    pub fn render(&mut self) -> Result<(), AppError> {
        loop {
            self.console.print_title("Welcome")?;
            for (i, action) in Action::ALL.iter().enumerate() {
                self.console.println(format_args!("Press {} to {}!", i + 1, action.description()))?;
            }
            let selection = self.console.read_int("", 1..=Action::ALL.len() as i64)?;
            let action = match selection {
                Prompt::Value(number) => Action::from_number(number),
                Prompt::Exhausted => None,
                Prompt::Closed => {
                    self.console.println("")?;
                    self.console.println("Input closed.")?;
                    Some(Action::Exit)
                }
            };
            self.console.println("")?;
            match action {
                Some(Action::Exit) => return self.exit(),
                Some(action) => self.perform(action)?,
                None => {}
            }
        }
    }

    fn perform(&mut self, action: Action) -> Result<(), AppError> {
        match action {
            Action::CreatePatient => self.create_patient(),
            Action::SearchPatientById => self.search_patient_by_id(),
            Action::SearchPatientsByName => self.search_patients_by_name(),
            Action::DeletePatient => self.delete_patient(),
            Action::DischargePatient => self.discharge_patient(),
            Action::EditIcd => self.edit_icd(),
            Action::PrintPatients => self.print_patients(),
            Action::CreateUser => self.create_user(),
            Action::DeleteUser => self.delete_user(),
            Action::Exit => self.exit(),
        }
    }

    fn return_to_menu(&mut self, message: &str) -> Result<(), AppError> {
        self.console.println(message)?;
        self.console.pause(RETURN_PROMPT)?;
        Ok(())
    }

    fn print_patient(&mut self, patient: &Patient) -> Result<(), AppError> {
        self.console.println(patient.card(self.controller.date_format()))
    }

    fn cancelled(&mut self) -> Result<(), AppError> {
        self.return_to_menu("Action cancelled.")
    }

    fn create_patient(&mut self) -> Result<(), AppError> {
        self.console.print_title("Create patient")?;
        let Some(first_name) = self.console.read_string("First name: ", false)?.value() else {
            return self.cancelled();
        };
        let Some(last_name) = self.console.read_string("Last name: ", false)?.value() else {
            return self.cancelled();
        };
        let Some(age) = self.console.read_int("Age (in years): ", AGE_RANGE)?.value() else {
            return self.cancelled();
        };
        let Some(icd) = self.console.read_string("ICD: ", true)?.value() else {
            return self.cancelled();
        };
        // bounded by AGE_RANGE
        match self.controller.create_patient(&first_name, &last_name, age as u8, Some(icd))? {
            Some(patient) => self.return_to_menu(&format!("The patient was created with the ID {}!", patient.id())),
            None => self.return_to_menu("No free patient ID is left, the patient was not created!"),
        }
    }

    fn create_user(&mut self) -> Result<(), AppError> {
        self.console.print_title("Create user")?;
        let Some(username) = self.console.read_string("Username: ", false)?.value() else {
            return self.cancelled();
        };
        let Some(password) = self.console.read_string("Password: ", false)?.value() else {
            return self.cancelled();
        };
        if self.controller.create_user(&username, &password_hash(&password))? {
            self.return_to_menu("The user was created!")
        } else {
            self.return_to_menu(&format!("A user with the username '{}' already exists!", username))
        }
    }

    fn delete_patient(&mut self) -> Result<(), AppError> {
        self.console.print_title("Delete patient")?;
        let Some(id) = self.console.read_int("ID: ", ID_RANGE)?.value() else {
            return self.cancelled();
        };
        // bounded by ID_RANGE
        if self.controller.delete_patient(id as u32)? {
            self.return_to_menu("The patient was deleted!")
        } else {
            self.return_to_menu(&format!("The patient with the ID '{}' could not be deleted!", id))
        }
    }

    fn delete_user(&mut self) -> Result<(), AppError> {
        self.console.print_title("Delete user")?;
        let Some(username) = self.console.read_string("Username: ", false)?.value() else {
            return self.cancelled();
        };
        if self.controller.delete_user(&username)? {
            self.return_to_menu("The user was deleted!")
        } else {
            self.return_to_menu(&format!("The user with the username '{}' could not be deleted!", username))
        }
    }

    /// Asks for ids until one names an existing patient, within the attempt bound.
    fn read_existing_patient(&mut self) -> Result<Option<Patient>, AppError> {
        for _ in 0..self.console.max_attempts() {
            let Some(id) = self.console.read_int("ID: ", ID_RANGE)?.value() else {
                return Ok(None);
            };
            match self.controller.search_patient("id", id)? {
                Some(patient) => return Ok(Some(patient)),
                None => {
                    self.console.println("No patient exists with the entered ID!")?;
                    self.console.println("")?;
                }
            }
        }
        Ok(None)
    }

    fn discharge_patient(&mut self) -> Result<(), AppError> {
        self.console.print_title("Discharge patient")?;
        let Some(patient) = self.read_existing_patient()? else {
            return self.cancelled();
        };
        match self.controller.discharge_patient(patient.id())? {
            Discharge::Discharged => self.return_to_menu("The patient was discharged with today's date!"),
            Discharge::AlreadyDischarged => self.return_to_menu("The patient has already been discharged!"),
            Discharge::NotFound => self.return_to_menu("No patient exists with the entered ID!"),
        }
    }

    fn edit_icd(&mut self) -> Result<(), AppError> {
        self.console.print_title("Add patient diagnosis")?;
        let Some(patient) = self.read_existing_patient()? else {
            return self.cancelled();
        };
        self.console.println("")?;
        self.console.println(format_args!("Old value: {}", patient.icd().unwrap_or("-")))?;
        let Some(icd) = self.console.read_string("New value: ", true)?.value() else {
            return self.cancelled();
        };
        self.controller.update_icd(patient.id(), Some(icd))?;
        self.return_to_menu("The ICD of the patient was updated!")
    }

    fn print_patients(&mut self) -> Result<(), AppError> {
        self.console.print_title("Patients")?;
        for patient in self.controller.patients()? {
            self.print_patient(&patient)?;
            self.console.println("")?;
        }
        self.return_to_menu("")
    }

    fn search_patient_by_id(&mut self) -> Result<(), AppError> {
        self.console.print_title("Search patient")?;
        let Some(id) = self.console.read_int("ID: ", ID_RANGE)?.value() else {
            return self.cancelled();
        };
        match self.controller.search_patient("id", id)? {
            Some(patient) => self.print_patient(&patient)?,
            None => self.console.println("No patient exists with this ID!")?,
        }
        self.return_to_menu("")
    }

    fn search_patients_by_name(&mut self) -> Result<(), AppError> {
        self.console.print_title("Search patients")?;
        let Some(name) = self.console.read_string("Last name: ", false)?.value() else {
            return self.cancelled();
        };
        let patients = self.controller.search_patients("lastName", name)?;
        if patients.is_empty() {
            self.console.println("No patient was found!")?;
        }
        for patient in &patients {
            self.print_patient(patient)?;
            self.console.println("")?;
        }
        self.return_to_menu("")
    }

    fn exit(&mut self) -> Result<(), AppError> {
        self.console.println("Saving users...")?;
        match self.controller.persist_users() {
            Ok(()) => self.console.println("done")?,
            Err(e) => self.console.println(format_args!("error ({})", e))?,
        }
        self.console.println("Saving patients...")?;
        match self.controller.persist_patients() {
            Ok(()) => self.console.println("done")?,
            Err(e) => self.console.println(format_args!("error ({})", e))?,
        }
        self.console.println("Goodbye!")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_numbers_map_to_actions() {
        assert_eq!(Action::from_number(1), Some(Action::CreatePatient));
        assert_eq!(Action::from_number(10), Some(Action::Exit));
        assert_eq!(Action::from_number(0), None);
        assert_eq!(Action::from_number(11), None);
        assert_eq!(Action::from_number(-3), None);
    }
}
