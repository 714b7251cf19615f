use crate::model::Role;

/// Sidebar entries of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Inicio,
    Personas,
    Familias,
    Parcialidades,
    Reuniones,
    Asistencia,
    RegistrarAsistencia,
    Publicaciones,
    Reportes,
    Usuarios,
}

const ADMIN_SECTIONS: &[Section] = &[
    Section::Inicio,
    Section::Personas,
    Section::Familias,
    Section::Parcialidades,
    Section::Reuniones,
    Section::Asistencia,
    Section::Publicaciones,
    Section::Reportes,
    Section::Usuarios,
];

const USER_SECTIONS: &[Section] = &[
    Section::Inicio,
    Section::Reuniones,
    Section::RegistrarAsistencia,
    Section::Publicaciones,
];

impl Section {
    pub fn label(&self) -> &'static str {
        match self {
            Section::Inicio => "Inicio",
            Section::Personas => "Personas",
            Section::Familias => "Familias",
            Section::Parcialidades => "Parcialidades",
            Section::Reuniones => "Reuniones",
            Section::Asistencia => "Asistencia",
            Section::RegistrarAsistencia => "Registrar asistencia",
            Section::Publicaciones => "Publicaciones",
            Section::Reportes => "Reportes",
            Section::Usuarios => "Usuarios",
        }
    }
}

pub fn sidebar(role: Role) -> &'static [Section] {
    match role {
        Role::Admin => ADMIN_SECTIONS,
        Role::Usuario => USER_SECTIONS,
    }
}

pub fn can_access(role: Role, section: Section) -> bool {
    sidebar(role).contains(&section)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_cannot_reach_admin_sections() {
        for section in [Section::Personas, Section::Familias, Section::Reportes, Section::Usuarios] {
            assert!(!can_access(Role::Usuario, section));
            assert!(can_access(Role::Admin, section));
        }
    }

    #[test]
    fn self_registration_is_user_only() {
        assert!(can_access(Role::Usuario, Section::RegistrarAsistencia));
        assert!(!can_access(Role::Admin, Section::RegistrarAsistencia));
    }
}
