/// Template users can download and fill in. Not derived from any upload.
pub const SAMPLE_CSV: &str = "\
Student_ID,Name,Department,CGPA,Internship,Placement_Status,Company,Salary_Package
S001,Aarav Shah,CSE,8.7,Yes,Placed,Google,24.5
S002,Diya Menon,ECE,7.9,Yes,Placed,Infosys,6.5
S003,Rohan Iyer,ME,6.8,No,Not Placed,Not Placed,
S004,Ananya Rao,CSE,9.2,Yes,Placed,Microsoft,28
S005,Kabir Singh,IT,7.4,No,Placed,TCS,4.2
S006,Meera Nair,ECE,8.1,Yes,Placed,Qualcomm,18
S007,Arjun Das,ME,6.5,No,Not Placed,Not Placed,
S008,Ishita Gupta,CSE,8.9,Yes,Placed,Amazon,26
S009,Vivaan Kumar,IT,7.1,Yes,Placed,Wipro,5.5
S010,Sara Thomas,CSE,6.9,No,Placed,Infosys,6.5
";

pub const SAMPLE_FILE_NAME: &str = "sample_placement_data.csv";
