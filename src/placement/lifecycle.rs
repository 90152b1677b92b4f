use super::domain::ApplicationStatus;

impl ApplicationStatus {
    /// Statuses reachable in one step. OFFERED and REJECTED are terminal.
    pub const fn allowed_transitions(self) -> &'static [ApplicationStatus] {
        use ApplicationStatus::*;

        match self {
            Applied => &[Shortlisted, Rejected],
            Shortlisted => &[Round1, Rejected],
            Round1 => &[Round2, Offered, Rejected],
            Round2 => &[Offered, Rejected],
            Offered | Rejected => &[],
        }
    }

    pub fn can_transition_to(self, target: ApplicationStatus) -> bool {
        self.allowed_transitions().contains(&target)
    }

    pub const fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::ApplicationStatus::{self, *};

    #[test]
    fn transition_table_matches_recruitment_pipeline() {
        let legal = [
            (Applied, Shortlisted),
            (Applied, Rejected),
            (Shortlisted, Round1),
            (Shortlisted, Rejected),
            (Round1, Round2),
            (Round1, Offered),
            (Round1, Rejected),
            (Round2, Offered),
            (Round2, Rejected),
        ];

        for from in ApplicationStatus::ALL {
            for to in ApplicationStatus::ALL {
                assert_eq!(
                    from.can_transition_to(to),
                    legal.contains(&(from, to)),
                    "{from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn offered_and_rejected_are_terminal() {
        assert!(Offered.is_terminal());
        assert!(Rejected.is_terminal());
        assert!(!Applied.is_terminal());
        assert!(!Round2.is_terminal());
    }
}
