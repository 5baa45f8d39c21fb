use crate::api::types::{ContactFields, HrContact};
use crate::validate::{check_email, FieldErrors};

/// One input of the add/edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    HrName,
    Email,
    MobileNumber,
    CompanyName,
    JobRole,
    Notes,
}

impl DraftField {
    /// Key under which validation errors for this input are reported.
    pub fn key(self) -> &'static str {
        match self {
            DraftField::HrName => "hrName",
            DraftField::Email => "email",
            DraftField::MobileNumber => "mobileNumber",
            DraftField::CompanyName => "companyName",
            DraftField::JobRole => "jobRole",
            DraftField::Notes => "notes",
        }
    }
}

/// Raw contents of the add/edit form, one string per input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub hr_name: String,
    pub email: String,
    pub mobile_number: String,
    pub company_name: String,
    pub job_role: String,
    pub notes: String,
}

impl ContactDraft {
    /// Prefill from an existing contact for editing.
    pub fn from_contact(contact: &HrContact) -> Self {
        Self {
            hr_name: contact.hr_name.clone(),
            email: contact.email.clone(),
            mobile_number: contact.mobile_number.clone().unwrap_or_default(),
            company_name: contact.company_name.clone(),
            job_role: contact.job_role.clone().unwrap_or_default(),
            notes: contact.notes.clone().unwrap_or_default(),
        }
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::HrName => &self.hr_name,
            DraftField::Email => &self.email,
            DraftField::MobileNumber => &self.mobile_number,
            DraftField::CompanyName => &self.company_name,
            DraftField::JobRole => &self.job_role,
            DraftField::Notes => &self.notes,
        }
    }

    pub fn get_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::HrName => &mut self.hr_name,
            DraftField::Email => &mut self.email,
            DraftField::MobileNumber => &mut self.mobile_number,
            DraftField::CompanyName => &mut self.company_name,
            DraftField::JobRole => &mut self.job_role,
            DraftField::Notes => &mut self.notes,
        }
    }

    /// HR name, a well-formed email and company name are required; the rest
    /// are optional and sent only when non-blank.
    pub fn validate(&self) -> Result<ContactFields, FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.hr_name.trim().is_empty() {
            errors.insert("hrName", "HR name is required");
        }
        check_email(&mut errors, "email", &self.email);
        if self.company_name.trim().is_empty() {
            errors.insert("companyName", "Company name is required");
        }

        errors.into_result(ContactFields {
            hr_name: self.hr_name.trim().to_string(),
            email: self.email.trim().to_string(),
            mobile_number: optional(&self.mobile_number),
            company_name: self.company_name.trim().to_string(),
            job_role: optional(&self.job_role),
            notes: optional(&self.notes),
        })
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
