use serde::Deserialize;

/// Vessels and stations that may file a report.
pub const VESSELS: &[&str] = &[
    "1007함",
    "516함",
    "517함",
    "117정",
    "123정",
    "216정",
    "P-22정",
    "P-55정",
    "P-62정",
    "P-76정",
    "P-98정",
    "P-115정",
    "방제15호함",
    "방제26호정",
    "화학방제2함",
];

pub const DEPARTMENTS: &[&str] = &["항해", "안전", "통신", "기관"];

pub const RANKS: &[&str] = &["순경", "경장", "경사", "경위", "경감", "경정"];

/// Raw form fields as they arrive from the intake form or the API.
/// Every field defaults to empty so partial bodies deserialize and fail
/// validation with a full list of violations instead of a serde error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportForm {
    #[serde(default)]
    pub vessel: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub rank: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub equipment: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub action_req: String,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub status: String,
}

/// A validated submission. The renderer and dispatcher rely on the §3
/// invariants holding here, so the only way to construct one is
/// [`ReportForm::validate`].
#[derive(Debug, Clone)]
pub struct SubmissionRecord {
    pub vessel: String,
    pub department: String,
    pub rank: String,
    pub name: String,
    pub phone: String,
    pub equipment: String,
    pub model: String,
    pub action_req: String,
    pub condition: String,
    pub status: String,
}

impl ReportForm {
    /// Checks the required fields and catalog memberships, returning either
    /// the validated record or every violation found.
    pub fn validate(self) -> Result<SubmissionRecord, Vec<String>> {
        let mut errors = Vec::new();

        let vessel = self.vessel.trim();
        if vessel.is_empty() {
            errors.push("함정(파출소)을 선택해 주세요".to_string());
        } else if !VESSELS.contains(&vessel) {
            errors.push(format!("알 수 없는 함정: {vessel}"));
        }

        let department = self.department.trim();
        if !department.is_empty() && !DEPARTMENTS.contains(&department) {
            errors.push(format!("알 수 없는 부서: {department}"));
        }

        let rank = self.rank.trim();
        if !rank.is_empty() && !RANKS.contains(&rank) {
            errors.push(format!("알 수 없는 계급: {rank}"));
        }

        if self.name.trim().is_empty() {
            errors.push("성명은 필수 입력 항목입니다".to_string());
        }

        if self.equipment.trim().is_empty() {
            errors.push("장비명은 필수 입력 항목입니다".to_string());
        }

        if self.status.trim().is_empty() {
            errors.push("함정 점검 사항은 필수 입력 항목입니다".to_string());
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(SubmissionRecord {
            vessel: vessel.to_string(),
            department: department.to_string(),
            rank: rank.to_string(),
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            equipment: self.equipment.trim().to_string(),
            model: self.model.trim().to_string(),
            action_req: self.action_req.trim().to_string(),
            condition: self.condition.trim().to_string(),
            status: self.status.trim().to_string(),
        })
    }
}

impl SubmissionRecord {
    /// Composed department/equipment cell, e.g. `기관-발전기`.
    pub fn dept_equipment(&self) -> String {
        format!("{}-{}", self.department, self.equipment)
    }

    /// Composed reporter cell, e.g. `경사 홍길동`.
    pub fn reporter(&self) -> String {
        format!("{} {}", self.rank, self.name)
    }

    /// Download filename for the rendered report.
    pub fn filename(&self) -> String {
        format!("Report_{}_{}.pdf", self.vessel, self.equipment)
    }

    /// Lines of the detailed status, embedded line breaks split out.
    pub fn status_lines(&self) -> Vec<String> {
        self.status.lines().map(|l| l.to_string()).collect()
    }
}
