//! Static administrator accounts and the closed set of departments.

/// The seven departments students can be enrolled in.
///
/// Course labels on student records must match one of these exactly;
/// free-form strings are rejected at write time so that department
/// filtering can never silently return zero rows because of a label typo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Department {
    InformationTechnology,
    ComputerScience,
    ElectronicsCommunication,
    ElectricalElectronics,
    Mechanical,
    Automobile,
    Civil,
}

impl Department {
    pub const ALL: [Department; 7] = [
        Department::InformationTechnology,
        Department::ComputerScience,
        Department::ElectronicsCommunication,
        Department::ElectricalElectronics,
        Department::Mechanical,
        Department::Automobile,
        Department::Civil,
    ];

    /// Canonical course label as stored on student records.
    pub fn label(&self) -> &'static str {
        match self {
            Department::InformationTechnology => "BE - Information Technology",
            Department::ComputerScience => "BE - Computer Science and Engineering",
            Department::ElectronicsCommunication => {
                "BE - Electronics and Communication Engineering"
            }
            Department::ElectricalElectronics => "BE - Electrical and Electronics Engineering",
            Department::Mechanical => "BE - Mechanical Engineering",
            Department::Automobile => "BE - Automobile Engineering",
            Department::Civil => "BE - Civil Engineering",
        }
    }

    /// Exact-label lookup. No normalization: a label differing in case or
    /// whitespace is not a department.
    pub fn from_label(label: &str) -> Option<Department> {
        Department::ALL.iter().find(|d| d.label() == label).copied()
    }
}

/// Data visibility granted to an administrator account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminScope {
    /// Sees every student record.
    Main,
    /// Sees only records whose course matches the department.
    Department(Department),
}

/// One entry of the static credential registry.
///
/// Demo accounts only: passwords are compared in plaintext.
#[derive(Debug, Clone, Copy)]
pub struct AdminCredential {
    pub username: &'static str,
    pub password: &'static str,
    pub scope: AdminScope,
    /// Accent color the front-end renders for this admin.
    pub color: &'static str,
    pub display_name: &'static str,
}

impl AdminCredential {
    /// Department label shown to the client, "All Departments" for the
    /// main administrator.
    pub fn department_label(&self) -> &'static str {
        match self.scope {
            AdminScope::Main => "All Departments",
            AdminScope::Department(dept) => dept.label(),
        }
    }
}

/// Demo credentials - one main administrator plus one admin per department.
pub const ADMIN_CREDENTIALS: &[AdminCredential] = &[
    AdminCredential {
        username: "adminmain",
        password: "admingce",
        scope: AdminScope::Main,
        color: "#FFD700", // Gold
        display_name: "Main Administrator",
    },
    AdminCredential {
        username: "admin-it",
        password: "adminit123",
        scope: AdminScope::Department(Department::InformationTechnology),
        color: "#0984E3", // Electric Blue
        display_name: "IT Department Admin",
    },
    AdminCredential {
        username: "admin-cse",
        password: "admincse123",
        scope: AdminScope::Department(Department::ComputerScience),
        color: "#9B59B6", // Purple
        display_name: "CSE Department Admin",
    },
    AdminCredential {
        username: "admin-ece",
        password: "adminece123",
        scope: AdminScope::Department(Department::ElectronicsCommunication),
        color: "#27AE60", // Green
        display_name: "ECE Department Admin",
    },
    AdminCredential {
        username: "admin-eee",
        password: "admineee123",
        scope: AdminScope::Department(Department::ElectricalElectronics),
        color: "#E67E22", // Orange
        display_name: "EEE Department Admin",
    },
    AdminCredential {
        username: "admin-mech",
        password: "adminmech123",
        scope: AdminScope::Department(Department::Mechanical),
        color: "#E74C3C", // Red
        display_name: "Mechanical Department Admin",
    },
    AdminCredential {
        username: "admin-auto",
        password: "adminauto123",
        scope: AdminScope::Department(Department::Automobile),
        color: "#00CEC9", // Cyan/Teal
        display_name: "Automobile Department Admin",
    },
    AdminCredential {
        username: "admin-civil",
        password: "admincivil123",
        scope: AdminScope::Department(Department::Civil),
        color: "#8B4513", // Brown
        display_name: "Civil Department Admin",
    },
];

/// Scan the registry for an exact username/password match. Usernames are
/// unique, so at most one entry can match.
pub fn find_admin(username: &str, password: &str) -> Option<&'static AdminCredential> {
    ADMIN_CREDENTIALS
        .iter()
        .find(|a| a.username == username && a.password == password)
}
