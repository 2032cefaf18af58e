//! Fixed portfolio content.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Frontend,
    Backend,
    Tools,
    Design,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::Frontend => "Frontend",
            Category::Backend => "Backend",
            Category::Tools => "Tools",
            Category::Design => "Design",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Skill {
    pub name: &'static str,
    pub category: Category,
}

#[derive(Debug, Clone, Copy)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub technologies: &'static [&'static str],
    pub link: &'static str,
    pub github: &'static str,
}

pub struct Bio {
    pub name: &'static str,
    pub role: &'static str,
    pub summary: &'static str,
    pub github: &'static str,
    pub linkedin: &'static str,
}

pub const BIO: Bio = Bio {
    name: "Abel",
    role: "Full-Stack Developer",
    summary: "I build full-stack web applications from idea to launch, crafting scalable, \
              user-focused solutions with modern technologies.",
    github: "https://github.com/abelwebdev",
    linkedin: "https://www.linkedin.com/in/abelwebdev",
};

const fn skill(name: &'static str, category: Category) -> Skill {
    Skill { name, category }
}

pub const SKILLS: &[Skill] = &[
    skill("JavaScript", Category::Frontend),
    skill("TypeScript", Category::Frontend),
    skill("Next.js", Category::Frontend),
    skill("React", Category::Frontend),
    skill("Node.js", Category::Backend),
    skill("Redux", Category::Frontend),
    skill("Express.js", Category::Backend),
    skill("Fastify", Category::Backend),
    skill("Firebase", Category::Backend),
    skill("Tailwind", Category::Frontend),
    skill("Prisma", Category::Backend),
    skill("Postgres", Category::Backend),
    skill("MySQL", Category::Backend),
    skill("MongoDB", Category::Backend),
    skill("Git", Category::Tools),
];

pub const PROJECTS: &[Project] = &[
    Project {
        title: "Flick Verse",
        description: "A movie streaming platform built with React and Tailwind CSS, featuring \
                      the latest movies and TV shows with fast search functionality.",
        technologies: &["TypeScript", "React", "Tailwind", "Framer Motion"],
        link: "https://flick-verse.netlify.app",
        github: "https://github.com/abelwebdev/flick-verse",
    },
    Project {
        title: "Fit Track",
        description: "A full-stack fitness platform with 1300+ exercises for tracking workouts, \
                      building custom routines, and monitoring progress.",
        technologies: &[
            "TypeScript",
            "React",
            "Fastify",
            "MongoDB",
            "Redux",
            "Tailwind",
            "Firebase",
        ],
        link: "https://fit-trackweb.netlify.app",
        github: "https://github.com/abelwebdev/fit-track",
    },
    Project {
        title: "Guitar JamTrack",
        description: "A Next.js platform for guitar enthusiasts to browse, play, and organize \
                      backing tracks with seamless playlist creation and artist discovery.",
        technologies: &[
            "TypeScript",
            "Next.js",
            "Tailwind",
            "Prisma",
            "PostgreSQL",
            "Neon",
            "Shadcn/ui",
            "Firebase",
        ],
        link: "https://guitar-jam-track.netlify.app",
        github: "https://github.com/abelwebdev/guitar-jam-track",
    },
];

pub fn skill_names() -> Vec<&'static str> {
    SKILLS.iter().map(|s| s.name).collect()
}

pub fn skills_in(category: Category) -> impl Iterator<Item = &'static Skill> {
    SKILLS.iter().filter(move |s| s.category == category)
}
