// ABOUTME: Fixed demo data for NeuroRehab CareTrack: staff, settings lists, clients, reports, chat
// ABOUTME: A SeedPlan is plain data so tests can run the seeder with their own subset
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::collections::BTreeMap;

use caretrack_core::models::{
    ActivityRecord, ChatChannel, ClientTemplate, OrgConfig, ReportPayload, ReportSection,
    RiskLevel, StaffAccount, StayPlan,
};

/// Everything one seeding run writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedPlan {
    /// Staff identities, in creation order
    pub staff: Vec<StaffAccount>,
    /// Singleton settings lists
    pub org_config: OrgConfig,
    /// Patients, in insertion order
    pub clients: Vec<ClientTemplate>,
    /// Example payload filed for every client, one per section
    pub report_payloads: Vec<(ReportSection, ReportPayload)>,
    /// Chat channels receiving one seed message each
    pub channels: Vec<ChatChannel>,
}

impl SeedPlan {
    /// The CareTrack demo data set
    #[must_use]
    pub fn demo() -> Self {
        Self {
            staff: demo_staff(),
            org_config: demo_org_config(),
            clients: demo_clients(),
            report_payloads: ReportSection::ALL
                .iter()
                .map(|section| (*section, demo_payload(*section)))
                .collect(),
            channels: vec![
                ChatChannel::new("General Ward"),
                ChatChannel::new("Urgent Alerts"),
            ],
        }
    }

    /// Demo data with a different staff list
    #[must_use]
    pub fn with_staff(mut self, staff: Vec<StaffAccount>) -> Self {
        self.staff = staff;
        self
    }
}

fn demo_staff() -> Vec<StaffAccount> {
    vec![
        StaffAccount::new("admin@neurorehab.demo", "Admin123!", "Admin User", &["admin"]),
        StaffAccount::new("nurse@neurorehab.demo", "Nurse123!", "Nurse Jane", &["nurse"]),
        StaffAccount::new(
            "doctor@neurorehab.demo",
            "Doctor123!",
            "Dr. Smith",
            &["medical_officer", "doctor"],
        ),
        StaffAccount::new(
            "therapist@neurorehab.demo",
            "Therapist123!",
            "Therapist Lee",
            &["therapist"],
        ),
    ]
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn demo_org_config() -> OrgConfig {
    OrgConfig {
        psychiatric: strings(&[
            "Orientation",
            "Mood & Affect",
            "Thought Content",
            "Thought Process",
            "Perceptual Disturbances",
            "Insight",
            "Judgment",
            "Psychomotor Activity",
            "Sleep Pattern",
            "Appetite",
        ]),
        behavioral: strings(&[
            "Cooperation",
            "Peer Interaction",
            "Aggression/Irritability",
            "Substance Craving",
            "Wandering",
            "Emotional Regulation",
            "Response to Redirection",
            "Routine Participation",
        ]),
        adl: strings(&[
            "Personal Hygiene",
            "Dressing",
            "Toileting",
            "Feeding",
            "Mobility",
            "Room Maintenance",
            "Laundry",
            "Money Handling",
            "Time Management",
            "Phone Use",
        ]),
        therapeutic: strings(&[
            "Occupational Therapy",
            "Group Therapy",
            "Individual Counseling",
            "Yoga/Exercise",
            "Art/Music/Dance",
            "Vocational Training",
            "Life Skills",
            "Recreation",
            "Psychoeducation",
            "Cognitive Remediation",
        ]),
        risk: strings(&[
            "Suicidal Ideation",
            "Aggression/Violence",
            "Absconding Risk",
            "Substance Relapse",
            "Falls/Physical Safety",
            "Vulnerability",
            "Medication Safety",
        ]),
        diagnosis_options: strings(&[
            "Schizophrenia",
            "Bipolar Disorder",
            "Major Depressive Disorder",
            "Anxiety Disorder",
            "Personality Disorder",
            "Substance Use Disorder",
            "Cognitive Disorder",
            "Other",
        ]),
        ward_names: strings(&[
            "Ward A",
            "Ward B",
            "Ward C",
            "General Ward",
            "High Dependency",
            "Step-down",
        ]),
        room_bed_numbers: strings(&[
            "A/101", "A/102", "A/103", "B/201", "B/202", "C/301", "C/302", "GD/1", "GD/2", "HD/1",
            "SD/1",
        ]),
    }
}

#[allow(clippy::too_many_arguments)]
fn client(
    name: &str,
    dob: &str,
    gender: &str,
    diagnosis: &str,
    stay: StayPlan,
    current_risk: RiskLevel,
    assigned_therapist: &str,
    ward: &str,
    room_number: &str,
) -> ClientTemplate {
    ClientTemplate {
        name: name.to_owned(),
        dob: dob.to_owned(),
        gender: gender.to_owned(),
        diagnosis: diagnosis.to_owned(),
        stay,
        current_risk,
        assigned_therapist: assigned_therapist.to_owned(),
        ward: ward.to_owned(),
        room_number: room_number.to_owned(),
    }
}

fn demo_clients() -> Vec<ClientTemplate> {
    vec![
        client(
            "Alice Cooper",
            "1985-03-12",
            "Female",
            "Bipolar Disorder",
            StayPlan::LONG,
            RiskLevel::High,
            "Therapist Lee",
            "Ward A",
            "A/101",
        ),
        client(
            "Bob Wilson",
            "1972-07-08",
            "Male",
            "Schizophrenia",
            StayPlan::SHORT,
            RiskLevel::Medium,
            "Dr. Smith",
            "Ward B",
            "B/201",
        ),
        client(
            "Carol Davis",
            "1990-11-22",
            "Female",
            "Major Depressive Disorder",
            StayPlan::LONG,
            RiskLevel::Low,
            "Therapist Lee",
            "General Ward",
            "GD/1",
        ),
        client(
            "David Brown",
            "1965-01-05",
            "Male",
            "Anxiety Disorder",
            StayPlan::SHORT,
            RiskLevel::None,
            "Dr. Smith",
            "Ward C",
            "C/301",
        ),
    ]
}

/// Example payload filed under `section`
#[must_use]
pub fn demo_payload(section: ReportSection) -> ReportPayload {
    match section {
        ReportSection::Psychiatric => ReportPayload::Ratings {
            ratings: BTreeMap::from([
                ("Orientation".to_owned(), 4),
                ("Mood & Affect".to_owned(), 3),
                ("Thought Content".to_owned(), 4),
            ]),
            notes: "Stable.".to_owned(),
        },
        ReportSection::Behavioral => ReportPayload::Ratings {
            ratings: BTreeMap::from([
                ("Cooperation".to_owned(), 5),
                ("Peer Interaction".to_owned(), 4),
            ]),
            notes: "Engaged in group.".to_owned(),
        },
        ReportSection::Adl => ReportPayload::Levels {
            levels: BTreeMap::from([
                ("Personal Hygiene".to_owned(), "Independent".to_owned()),
                ("Mobility".to_owned(), "Supervised".to_owned()),
            ]),
            notes: String::new(),
        },
        ReportSection::Therapeutic => ReportPayload::Activities {
            activities: BTreeMap::from([(
                "Group Therapy".to_owned(),
                ActivityRecord {
                    attendance: "Yes".to_owned(),
                    engagement: "Good".to_owned(),
                },
            )]),
            notes: String::new(),
        },
        ReportSection::Risk => ReportPayload::Levels {
            levels: BTreeMap::from([
                ("Suicidal Ideation".to_owned(), "None".to_owned()),
                ("Aggression/Violence".to_owned(), "Low".to_owned()),
            ]),
            notes: String::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_plan_shape() {
        let plan = SeedPlan::demo();

        assert_eq!(plan.staff.len(), 4);
        assert_eq!(plan.clients.len(), 4);
        assert_eq!(plan.report_payloads.len(), 5);
        assert_eq!(plan.channels.len(), 2);
        assert!(plan.channels[1].is_urgent());
        assert!(!plan.channels[0].is_urgent());
    }

    #[test]
    fn test_demo_staff_roles() {
        let plan = SeedPlan::demo();
        let doctor = &plan.staff[2];

        assert_eq!(doctor.primary_role(), "medical_officer");
        assert!(doctor.roles.iter().any(|r| r == "doctor"));
        assert!(plan
            .staff
            .iter()
            .all(|s| s.email.ends_with("@neurorehab.demo")));
    }

    #[test]
    fn test_clients_use_configured_options() {
        let plan = SeedPlan::demo();

        for client in &plan.clients {
            assert!(plan.org_config.ward_names.contains(&client.ward));
            assert!(plan.org_config.room_bed_numbers.contains(&client.room_number));
            assert!(plan.org_config.diagnosis_options.contains(&client.diagnosis));
        }
    }
}
