// Static project catalog shown by the modal. Defined once, read-only.

use serde::Serialize;

/// One project's detail record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDescriptor {
    pub title: &'static str,
    pub full_description: &'static str,
    pub features: &'static [&'static str],
    pub technologies: &'static [&'static str],
    pub github_url: &'static str,
    pub demo_url: &'static str,
}

pub static PROJECTS: [ProjectDescriptor; 4] = [
    ProjectDescriptor {
        title: "Internet-based Drone Communication System",
        full_description: "Developed a robust communication system that enables drone-ground station connection over the internet using 5G technology. The system provides secure, reliable communication for remote drone operations and has been field-tested in challenging environments including Madhya Pradesh mines in collaboration with the Ministry of Coal. This project demonstrates innovative solutions for long-range drone connectivity and control.",
        features: &[
            "5G-based remote drone control and monitoring",
            "Secure VPN communication protocols",
            "Real-time data transmission and telemetry",
            "Field-tested in industrial mining environments",
            "Scalable architecture for multiple drone management",
            "Integration with ground control station systems",
        ],
        technologies: &["Python", "VPN", "5G Communication", "IoT", "Networking", "Linux"],
        github_url: "https://github.com/rishimehta/drone-communication",
        demo_url: "https://drone-comm-demo.com",
    },
    ProjectDescriptor {
        title: "ABU Robocon Competition Robots",
        full_description: "Designed and programmed advanced four-wheel omni-directional robots with unique gripper mechanisms for the ABU Robocon competition. These robots achieved the fastest 'che-yo' performance in India and contributed to India securing 6th rank worldwide at ABU Robocon 2023 in Cambodia. The project won the prestigious Visvesvaraya Award worth ₹1L INR for Best Robot Design and the SMC Corporation Award for Great Technical Skill.",
        features: &[
            "Four-wheel omni-directional drive system",
            "Custom-designed unique gripper mechanisms",
            "Semi-autonomous navigation and control",
            "BLDC motor control with CAN communication",
            "IMU-based stabilization and feedback",
            "High-speed precision movement capabilities",
        ],
        technologies: &["Arduino", "STM32", "PID Control", "IMU Sensors", "BLDC Motors", "CAN Protocol"],
        github_url: "https://github.com/rishimehta/robocon-robots",
        demo_url: "https://youtu.be/robocon-demo",
    },
    ProjectDescriptor {
        title: "E-yantra Drawing Robot",
        full_description: "Created an advanced drawing robot equipped with precision stepper and servo motors that uses inverse kinematics algorithms and OpenCV for real-time image processing and drawing. The robot can convert digital images into physical drawings with high accuracy and secured a top 5 position countrywide in the prestigious E-yantra competition organized by IIT Bombay.",
        features: &[
            "Inverse kinematics for precise movement control",
            "Real-time image processing with OpenCV",
            "TCP protocol communication with base station",
            "Stepper and servo motor coordination",
            "Automatic path planning and optimization",
            "High-precision drawing capabilities",
        ],
        technologies: &["OpenCV", "Inverse Kinematics", "TCP Protocol", "Servo Control", "Image Processing", "Python"],
        github_url: "https://github.com/rishimehta/eyantra-drawing-robot",
        demo_url: "https://youtu.be/drawing-robot-demo",
    },
    ProjectDescriptor {
        title: "Autonomous Forklift Robot",
        full_description: "Developed for Loop Robotics company in Ahmedabad, this industrial autonomous forklift robot features IMU-based straight-line driving algorithms, advanced depth cameras, and LiDAR sensors for precise pallet detection and handling. The system incorporates sophisticated sensor fusion techniques for reliable obstacle avoidance and navigation in warehouse environments.",
        features: &[
            "IMU-based navigation and straight-line driving",
            "LiDAR integration for precise pallet detection",
            "Depth camera array for 3D environment mapping",
            "Advanced sensor fusion for obstacle avoidance",
            "Autonomous material handling and sorting",
            "Industrial-grade reliability and safety systems",
        ],
        technologies: &["IMU Sensors", "LiDAR", "Computer Vision", "Sensor Fusion", "Path Planning", "ROS"],
        github_url: "https://github.com/rishimehta/autonomous-forklift",
        demo_url: "https://forklift-demo.com",
    },
];

/// Clamp a trigger index into the catalog. Out-of-range selects entry 0.
pub fn resolve_index(index: usize) -> usize {
    if index < PROJECTS.len() {
        index
    } else {
        0
    }
}

/// Look up a project by trigger index, never failing.
pub fn project_at(index: usize) -> &'static ProjectDescriptor {
    &PROJECTS[resolve_index(index)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_range_index_selects_entry() {
        assert_eq!(project_at(2).title, "E-yantra Drawing Robot");
        assert_eq!(resolve_index(3), 3);
    }

    #[test]
    fn out_of_range_clamps_to_first() {
        assert_eq!(resolve_index(4), 0);
        assert_eq!(resolve_index(usize::MAX), 0);
        assert_eq!(project_at(99), &PROJECTS[0]);
    }

    #[test]
    fn catalog_entries_are_complete() {
        for project in PROJECTS.iter() {
            assert!(!project.title.is_empty());
            assert!(!project.features.is_empty());
            assert!(!project.technologies.is_empty());
            assert!(project.github_url.starts_with("https://"));
            assert!(project.demo_url.starts_with("https://"));
        }
    }
}
