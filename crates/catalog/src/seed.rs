//! Seeded catalog data
//!
//! The directory panels are backed by a curated Atlanta-area dataset rather
//! than a database. The catalog is built once at startup and treated as a
//! read-only snapshot; filtering borrows from it and never mutates it.

use crate::locale::tr;
use crate::records::{Category, Mentor, Resource, RouteKind, Scholarship, TransitRoute};
use chrono::NaiveDate;

/// The full seeded catalog: one collection per directory panel.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub resources: Vec<Resource>,
    pub scholarships: Vec<Scholarship>,
    pub mentors: Vec<Mentor>,
    pub transit_routes: Vec<TransitRoute>,
}

impl Catalog {
    /// Build the curated dataset.
    pub fn seeded() -> Self {
        Self {
            resources: resources(),
            scholarships: scholarships(),
            mentors: mentors(),
            transit_routes: transit_routes(),
        }
    }
}

fn resources() -> Vec<Resource> {
    vec![
        Resource {
            id: "1".into(),
            name: tr(
                "Hispanic Student Association",
                "Asociación de Estudiantes Hispanos",
            ),
            description: tr(
                "Student organization providing support and community for Hispanic students at GSU.",
                "Organización estudiantil que brinda apoyo y comunidad a estudiantes hispanos en GSU.",
            ),
            category: Category::Education,
            address: "33 Gilmer St SE, Atlanta, GA 30303".into(),
            phone: Some("(404) 555-1234".into()),
            website: Some("https://example.com/hsa".into()),
            latitude: 33.7525,
            longitude: -84.3854,
        },
        Resource {
            id: "2".into(),
            name: tr("Latin American Association", "Asociación Latinoamericana"),
            description: tr(
                "Nonprofit organization offering immigration services, family services, and youth programs.",
                "Organización sin fines de lucro que ofrece servicios de inmigración, servicios familiares y programas juveniles.",
            ),
            category: Category::Community,
            address: "2750 Buford Hwy NE, Atlanta, GA 30324".into(),
            phone: Some("(404) 638-1800".into()),
            website: Some("https://thelaa.org".into()),
            latitude: 33.8304,
            longitude: -84.3380,
        },
        Resource {
            id: "3".into(),
            name: tr("Hispanic Health Coalition", "Coalición de Salud Hispana"),
            description: tr(
                "Provides healthcare resources, screenings, and education for the Hispanic community.",
                "Proporciona recursos de atención médica, exámenes y educación para la comunidad hispana.",
            ),
            category: Category::Healthcare,
            address: "515 Fairburn Rd NW, Atlanta, GA 30331".into(),
            phone: Some("(404) 555-5678".into()),
            website: Some("https://example.com/hhc".into()),
            latitude: 33.7596,
            longitude: -84.5070,
        },
        Resource {
            id: "4".into(),
            name: tr(
                "Georgia Latino Law Foundation",
                "Fundación Latina de Derecho de Georgia",
            ),
            description: tr(
                "Provides legal assistance and education to the Hispanic community.",
                "Proporciona asistencia legal y educación a la comunidad hispana.",
            ),
            category: Category::Legal,
            address: "100 Edgewood Ave NE, Atlanta, GA 30303".into(),
            phone: Some("(404) 555-9012".into()),
            website: Some("https://example.com/gllf".into()),
            latitude: 33.7550,
            longitude: -84.3877,
        },
        Resource {
            id: "5".into(),
            name: tr("Hispanic Business Center", "Centro de Negocios Hispano"),
            description: tr(
                "Resources for Hispanic entrepreneurs and business owners.",
                "Recursos para empresarios y dueños de negocios hispanos.",
            ),
            category: Category::Employment,
            address: "75 Marietta St NW, Atlanta, GA 30303".into(),
            phone: Some("(404) 555-3456".into()),
            website: Some("https://example.com/hbc".into()),
            latitude: 33.7569,
            longitude: -84.3925,
        },
    ]
}

fn scholarships() -> Vec<Scholarship> {
    vec![
        Scholarship {
            id: "1".into(),
            name: tr("Hispanic Scholarship Fund", "Fondo de Becas Hispanas"),
            description: tr(
                "Scholarships for Hispanic students in all disciplines.",
                "Becas para estudiantes hispanos en todas las disciplinas.",
            ),
            eligibility: tr(
                "Hispanic heritage, minimum 3.0 GPA, US citizen or permanent resident",
                "Herencia hispana, GPA mínimo de 3.0, ciudadano estadounidense o residente permanente",
            ),
            amount: "$500 - $5,000".into(),
            deadline: NaiveDate::from_ymd_opt(2025, 2, 15).expect("valid date"),
            website: "https://www.hsf.net".into(),
        },
        Scholarship {
            id: "2".into(),
            name: tr("TheDream.US Scholarship", "Beca TheDream.US"),
            description: tr(
                "For DREAMers who have DACA or TPS status.",
                "Para DREAMers que tienen estatus DACA o TPS.",
            ),
            eligibility: tr(
                "DACA or TPS eligible, 3.0 GPA, financial need",
                "Elegible para DACA o TPS, GPA de 3.0, necesidad financiera",
            ),
            amount: "Up to $33,000".into(),
            deadline: NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date"),
            website: "https://www.thedream.us".into(),
        },
        Scholarship {
            id: "3".into(),
            name: tr(
                "Georgia Hispanic Chamber of Commerce Scholarship",
                "Beca de la Cámara de Comercio Hispana de Georgia",
            ),
            description: tr(
                "For Hispanic students pursuing business degrees in Georgia.",
                "Para estudiantes hispanos que cursan carreras empresariales en Georgia.",
            ),
            eligibility: tr(
                "Hispanic heritage, Georgia resident, business major, 3.0 GPA",
                "Herencia hispana, residente de Georgia, especialización en negocios, GPA de 3.0",
            ),
            amount: "$2,500".into(),
            deadline: NaiveDate::from_ymd_opt(2025, 4, 15).expect("valid date"),
            website: "https://ghcc.org/scholarships".into(),
        },
        Scholarship {
            id: "4".into(),
            name: tr(
                "LULAC National Scholarship Fund",
                "Fondo Nacional de Becas LULAC",
            ),
            description: tr(
                "Scholarships for Hispanic students at various education levels.",
                "Becas para estudiantes hispanos en varios niveles educativos.",
            ),
            eligibility: tr(
                "Hispanic heritage, US citizen or permanent resident, 3.0 GPA",
                "Herencia hispana, ciudadano estadounidense o residente permanente, GPA de 3.0",
            ),
            amount: "$250 - $2,000".into(),
            deadline: NaiveDate::from_ymd_opt(2025, 3, 31).expect("valid date"),
            website: "https://lulac.org/programs/education/scholarships/".into(),
        },
        Scholarship {
            id: "5".into(),
            name: tr(
                "GSU Hispanic Alumni Scholarship",
                "Beca de Exalumnos Hispanos de GSU",
            ),
            description: tr(
                "For Hispanic students attending Georgia State University.",
                "Para estudiantes hispanos que asisten a la Universidad Estatal de Georgia.",
            ),
            eligibility: tr(
                "Hispanic heritage, enrolled at GSU, 3.0 GPA, financial need",
                "Herencia hispana, inscrito en GSU, GPA de 3.0, necesidad financiera",
            ),
            amount: "$1,000 - $3,000".into(),
            deadline: NaiveDate::from_ymd_opt(2025, 5, 1).expect("valid date"),
            website: "https://alumni.gsu.edu/scholarships".into(),
        },
    ]
}

fn mentors() -> Vec<Mentor> {
    vec![
        Mentor {
            id: "1".into(),
            name: "Carlos Rodriguez".into(),
            bio: tr(
                "Computer Science professor at GSU with 10+ years of experience teaching programming and AI.",
                "Profesor de Ciencias de la Computación en GSU con más de 10 años de experiencia enseñando programación e IA.",
            ),
            specialties: vec![
                "Computer Science".into(),
                "Programming".into(),
                "Artificial Intelligence".into(),
            ],
            availability: tr("Weekdays after 4 PM", "Días laborables después de las 4 PM"),
            location: "Downtown Atlanta".into(),
            rating: 4.9,
        },
        Mentor {
            id: "2".into(),
            name: "Maria Gonzalez".into(),
            bio: tr(
                "ESL instructor specializing in academic English and college application essays.",
                "Instructora de ESL especializada en inglés académico y ensayos de solicitud universitaria.",
            ),
            specialties: vec![
                "English".into(),
                "Writing".into(),
                "College Applications".into(),
            ],
            availability: tr(
                "Weekends and Tuesday evenings",
                "Fines de semana y martes por la noche",
            ),
            location: "Buckhead".into(),
            rating: 4.8,
        },
        Mentor {
            id: "3".into(),
            name: "Javier Mendez".into(),
            bio: tr(
                "Mathematics tutor with expertise in calculus, statistics, and SAT/ACT prep.",
                "Tutor de matemáticas con experiencia en cálculo, estadística y preparación para SAT/ACT.",
            ),
            specialties: vec![
                "Mathematics".into(),
                "Statistics".into(),
                "Test Prep".into(),
            ],
            availability: tr("Monday-Thursday, 6-9 PM", "Lunes a jueves, 6-9 PM"),
            location: "Decatur".into(),
            rating: 4.7,
        },
        Mentor {
            id: "4".into(),
            name: "Elena Fuentes".into(),
            bio: tr(
                "Biology and Chemistry tutor, pre-med advisor, and lab assistant at GSU.",
                "Tutora de Biología y Química, asesora pre-médica y asistente de laboratorio en GSU.",
            ),
            specialties: vec!["Biology".into(), "Chemistry".into(), "Pre-Med".into()],
            availability: tr(
                "Weekends and Wednesday evenings",
                "Fines de semana y miércoles por la noche",
            ),
            location: "Midtown".into(),
            rating: 4.9,
        },
        Mentor {
            id: "5".into(),
            name: "Roberto Sanchez".into(),
            bio: tr(
                "Business and Economics tutor with experience in finance, accounting, and entrepreneurship.",
                "Tutor de Negocios y Economía con experiencia en finanzas, contabilidad y emprendimiento.",
            ),
            specialties: vec!["Business".into(), "Economics".into(), "Finance".into()],
            availability: tr("Flexible schedule", "Horario flexible"),
            location: "Sandy Springs".into(),
            rating: 4.6,
        },
    ]
}

fn transit_routes() -> Vec<TransitRoute> {
    vec![
        TransitRoute {
            id: "1".into(),
            name: "Blue Line".into(),
            kind: RouteKind::Train,
            stops: vec![
                "Hamilton E. Holmes Station".into(),
                "Five Points Station".into(),
                "Georgia State Station".into(),
                "Inman Park Station".into(),
                "Decatur Station".into(),
                "Indian Creek Station".into(),
            ],
            schedule: tr(
                "Every 12 minutes, 5 AM - 1 AM",
                "Cada 12 minutos, 5 AM - 1 AM",
            ),
        },
        TransitRoute {
            id: "2".into(),
            name: "Gold Line".into(),
            kind: RouteKind::Train,
            stops: vec![
                "Doraville Station".into(),
                "Lenox Station".into(),
                "Midtown Station".into(),
                "Five Points Station".into(),
                "Airport Station".into(),
            ],
            schedule: tr(
                "Every 15 minutes, 5 AM - 1 AM",
                "Cada 15 minutos, 5 AM - 1 AM",
            ),
        },
        TransitRoute {
            id: "3".into(),
            name: "Red Line".into(),
            kind: RouteKind::Train,
            stops: vec![
                "North Springs Station".into(),
                "Sandy Springs Station".into(),
                "Buckhead Station".into(),
                "Midtown Station".into(),
                "Five Points Station".into(),
            ],
            schedule: tr(
                "Every 15 minutes, 5 AM - 1 AM",
                "Cada 15 minutos, 5 AM - 1 AM",
            ),
        },
        TransitRoute {
            id: "4".into(),
            name: "Route 21".into(),
            kind: RouteKind::Bus,
            stops: vec![
                "Georgia State Station".into(),
                "Memorial Drive".into(),
                "East Lake".into(),
                "Decatur Station".into(),
            ],
            schedule: tr(
                "Every 20 minutes, 6 AM - 11 PM",
                "Cada 20 minutos, 6 AM - 11 PM",
            ),
        },
        TransitRoute {
            id: "5".into(),
            name: "Route 55".into(),
            kind: RouteKind::Bus,
            stops: vec![
                "Five Points Station".into(),
                "Grant Park".into(),
                "Lakewood Station".into(),
                "Jonesboro Road".into(),
            ],
            schedule: tr(
                "Every 30 minutes, 6 AM - 10 PM",
                "Cada 30 minutos, 6 AM - 10 PM",
            ),
        },
        TransitRoute {
            id: "6".into(),
            name: "Route 39".into(),
            kind: RouteKind::Bus,
            stops: vec![
                "Midtown Station".into(),
                "Buford Highway".into(),
                "Plaza Fiesta".into(),
                "Doraville Station".into(),
            ],
            schedule: tr(
                "Every 25 minutes, 6 AM - 11 PM",
                "Cada 25 minutos, 6 AM - 11 PM",
            ),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{distinct_facets, filter, Query};
    use crate::locale::Locale;
    use std::collections::HashSet;

    #[test]
    fn catalog_ids_are_unique_per_collection() {
        let catalog = Catalog::seeded();

        let unique = |ids: Vec<&str>| ids.iter().cloned().collect::<HashSet<_>>().len() == ids.len();

        assert!(unique(catalog.resources.iter().map(|r| r.id.as_str()).collect()));
        assert!(unique(catalog.scholarships.iter().map(|s| s.id.as_str()).collect()));
        assert!(unique(catalog.mentors.iter().map(|m| m.id.as_str()).collect()));
        assert!(unique(catalog.transit_routes.iter().map(|t| t.id.as_str()).collect()));
    }

    #[test]
    fn resource_facets_cover_every_category() {
        let catalog = Catalog::seeded();
        let facets = distinct_facets(&catalog.resources, |r| r.facet_values());
        assert_eq!(
            facets,
            vec!["community", "education", "employment", "healthcare", "legal"]
        );
    }

    #[test]
    fn mentor_specialty_facets_are_sorted_and_distinct() {
        let catalog = Catalog::seeded();
        let facets = distinct_facets(&catalog.mentors, |m| m.facet_values());

        assert!(facets.windows(2).all(|w| w[0] < w[1]));
        assert!(facets.contains(&"Computer Science".to_string()));
        assert!(facets.contains(&"Finance".to_string()));
    }

    #[test]
    fn term_search_finds_mentors_in_both_languages() {
        let catalog = Catalog::seeded();

        let query = Query::term("calculus");
        let hits = filter(
            &catalog.mentors,
            &query,
            |m| m.search_fields(Locale::En),
            |m| m.facet_values(),
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Javier Mendez");

        let query = Query::term("cálculo");
        let hits = filter(
            &catalog.mentors,
            &query,
            |m| m.search_fields(Locale::Es),
            |m| m.facet_values(),
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Javier Mendez");
    }

    #[test]
    fn scholarship_search_covers_eligibility_text() {
        let catalog = Catalog::seeded();
        let hits = filter(
            &catalog.scholarships,
            &Query::term("daca"),
            |s| s.search_fields(Locale::En),
            |s| s.facet_values(),
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "2");
    }

    #[test]
    fn transit_routes_filter_by_kind_facet() {
        let catalog = Catalog::seeded();
        let trains = filter(
            &catalog.transit_routes,
            &Query::default().with_facet("train"),
            |t| t.search_fields(Locale::En),
            |t| t.facet_values(),
        );
        assert_eq!(trains.len(), 3);
        assert!(trains.iter().all(|t| t.kind == RouteKind::Train));
    }
}
