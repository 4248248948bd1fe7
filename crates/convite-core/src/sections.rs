use crate::record::InvitationRecord;

/// Blocks of the invitation page, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Header,
    Parents,
    Countdown,
    Calendar,
    /// 1-based feature panel.
    Highlight(usize),
    Escorts,
    Venues,
    Timeline,
    Hashtag,
    DressCode,
    Registry,
    Gallery,
    Rsvp,
    Footer,
    /// Floating control, outside the page flow.
    MusicPlayer,
}

pub const PAGE_ORDER: [Section; 17] = [
    Section::Header,
    Section::Parents,
    Section::Countdown,
    Section::Calendar,
    Section::Highlight(1),
    Section::Escorts,
    Section::Venues,
    Section::Highlight(2),
    Section::Timeline,
    Section::Hashtag,
    Section::Highlight(3),
    Section::DressCode,
    Section::Registry,
    Section::Gallery,
    Section::Rsvp,
    Section::Footer,
    Section::MusicPlayer,
];

impl Section {
    pub fn is_available(self, record: &InvitationRecord) -> bool {
        match self {
            Section::Header
            | Section::Countdown
            | Section::Calendar
            | Section::Gallery
            | Section::Rsvp
            | Section::Footer => true,
            Section::Parents => !record.parents.is_empty(),
            Section::Highlight(n) => record.highlight(n).is_some(),
            Section::Escorts => record.escorts.is_some(),
            Section::Venues => record.ceremony.is_some() || record.reception.is_some(),
            Section::Timeline => !record.timeline.is_empty(),
            Section::Hashtag => record.hashtag().is_some(),
            Section::DressCode => record.dress_code().is_some(),
            Section::Registry => record.registries.is_some(),
            Section::MusicPlayer => record.music().is_some(),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Header => "Mis XV Años",
            Section::Parents => "Nuestros Padres",
            Section::Countdown => "Falta muy poco para el gran día",
            Section::Calendar => "Calendario del Evento",
            Section::Highlight(_) => "Destacado",
            Section::Escorts => "Nuestros Padrinos",
            Section::Venues => "Ubicaciones del Evento",
            Section::Timeline => "Itinerario del Evento",
            Section::Hashtag => "Comparte Nuestra Alegría",
            Section::DressCode => "Código de Vestimenta",
            Section::Registry => "Mesa de Regalos",
            Section::Gallery => "Momentos Especiales",
            Section::Rsvp => "Confirmar Asistencia",
            Section::Footer => "Pie de página",
            Section::MusicPlayer => "Música",
        }
    }
}

pub fn visible_sections(record: &InvitationRecord) -> Vec<Section> {
    PAGE_ORDER
        .into_iter()
        .filter(|section| section.is_available(record))
        .collect()
}
